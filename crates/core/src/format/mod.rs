//! Content formatter: semi-structured report text to sanitized markup.

mod blocks;
mod markup;

pub use blocks::{parse, Block, Inline};

use crate::domain::SectionBody;
use std::fmt;

pub const NO_DATA_TEXT: &str = "No data available";

/// Markup that is safe to embed: every character that came from report text
/// has been escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    pub(crate) fn trusted(s: String) -> Self {
        SafeMarkup(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn format(raw: Option<&str>) -> SafeMarkup {
    let blocks = raw.map(parse).unwrap_or_default();
    if blocks.is_empty() {
        return placeholder();
    }
    SafeMarkup::trusted(markup::to_markup(&blocks))
}

pub fn format_body(body: &SectionBody) -> SafeMarkup {
    format(Some(body.as_str()))
}

pub fn placeholder() -> SafeMarkup {
    SafeMarkup::trusted(format!("<p>{NO_DATA_TEXT}</p>"))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_input_yield_placeholder() {
        assert_eq!(format(Some("")).as_str(), "<p>No data available</p>");
        assert_eq!(format(None).as_str(), "<p>No data available</p>");
        assert_eq!(format(Some(" \n\n ")).as_str(), "<p>No data available</p>");
    }

    #[test]
    fn bold_then_italic_in_order() {
        let html = format(Some("**bold** and *italic*")).into_string();
        assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
        assert_eq!(html.matches("<strong>").count(), 1);
        assert_eq!(html.matches("<em>").count(), 1);
        assert!(html.find("<strong>bold").unwrap() < html.find("<em>italic").unwrap());
    }

    #[test]
    fn hostile_markup_is_neutralized() {
        let html = format(Some("<script>x</script>")).into_string();
        assert!(!html.contains("<script"));
        assert_eq!(html, "<p>&lt;script&gt;x&lt;/script&gt;</p>");

        let html = format(Some("## <img src=x onerror=\"alert(1)\">\n- **<b>hi</b>**"))
            .into_string();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"));
        assert!(html.contains("<li><strong>&lt;b&gt;hi&lt;/b&gt;</strong></li>"));
    }

    #[test]
    fn full_document_structure() {
        let raw = "# Market\nSize is **$4B**.\nGrowing fast.\n\n- SMBs\n- *Enterprises*\n\nDone.";
        assert_eq!(
            format(Some(raw)).as_str(),
            "<h1>Market</h1>\
             <p>Size is <strong>$4B</strong>.<br>Growing fast.</p>\
             <ul><li>SMBs</li><li><em>Enterprises</em></li></ul>\
             <p>Done.</p>"
        );
    }

    #[test]
    fn placeholder_bodies_render_their_text() {
        assert_eq!(
            format_body(&SectionBody::Pending).as_str(),
            "<p>Analysis pending...</p>"
        );
    }

    #[test]
    fn escape_covers_markup_significant_characters() {
        assert_eq!(escape_html(r#"<a href='x'>&"#), "&lt;a href=&#39;x&#39;&gt;&amp;");
    }
}

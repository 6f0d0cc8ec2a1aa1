use super::blocks::{Block, Inline};
use super::escape_html;

/// Serializes a block tree. All text nodes are escaped here; the only tags in
/// the output are the ones written by this function.
pub fn to_markup(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{level}>"));
                write_inlines(&mut out, content);
                out.push_str(&format!("</h{level}>"));
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    write_inlines(&mut out, item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            Block::Paragraph(lines) => {
                out.push_str("<p>");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str("<br>");
                    }
                    write_inlines(&mut out, line);
                }
                out.push_str("</p>");
            }
        }
    }
    out
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                write_inlines(out, inner);
                out.push_str("</strong>");
            }
            Inline::Emphasis(text) => {
                out.push_str("<em>");
                out.push_str(&escape_html(text));
                out.push_str("</em>");
            }
        }
    }
}

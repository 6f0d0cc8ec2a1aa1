use crate::domain::{Report, SectionKey};
use crate::format::{escape_html, format_body, SafeMarkup};
use crate::render::{export_section_href, section_href, EXPORT_ALL_HREF};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: SectionKey,
    pub title: &'static str,
    pub icon_svg: &'static str,
    pub body: SafeMarkup,
    pub expand_href: String,
    pub export_href: String,
}

/// All four sections side by side, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    pub idea: String,
    pub cards: Vec<Card>,
}

pub fn card_grid(report: &Report) -> CardGrid {
    let cards = report
        .sections
        .iter()
        .map(|(key, body)| {
            let meta = key.meta();
            Card {
                key,
                title: meta.title,
                icon_svg: meta.icon_svg,
                body: format_body(body),
                expand_href: section_href(key),
                export_href: export_section_href(key),
            }
        })
        .collect();

    CardGrid {
        idea: report.idea.clone(),
        cards,
    }
}

impl CardGrid {
    pub fn to_html(&self) -> String {
        let mut s = String::new();
        s.push_str("<section class=\"results\">");
        s.push_str(&format!(
            "<div class=\"results-header\"><p class=\"results-idea\">&quot;{}&quot;</p>\
             <div class=\"results-actions\"><a class=\"btn\" href=\"/back\">New idea</a>\
             <a class=\"btn\" href=\"{}\" target=\"_blank\">Export PDF</a></div></div>",
            escape_html(&self.idea),
            EXPORT_ALL_HREF,
        ));
        s.push_str("<div class=\"card-grid\">");
        for card in &self.cards {
            let key = card.key.as_str();
            s.push_str(&format!(
                "<article class=\"result-card {key}\" id=\"card-{key}\">\
                 <header><span class=\"card-icon {key}\">{icon}</span><h3>{title}</h3>\
                 <a class=\"card-expand-btn\" href=\"{expand}\">Expand</a>\
                 <a class=\"card-export-btn\" href=\"{export}\" target=\"_blank\">Export</a></header>\
                 <div class=\"card-content\" id=\"content-{key}\">{body}</div></article>",
                icon = card.icon_svg,
                title = card.title,
                expand = card.expand_href,
                export = card.export_href,
                body = card.body,
            ));
        }
        s.push_str("</div></section>");
        s
    }
}

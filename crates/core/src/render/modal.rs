use crate::domain::{Report, SectionKey};
use crate::format::{format_body, SafeMarkup};
use crate::render::export_section_href;

/// One section in full. Opening another section builds a new view; nothing is
/// remembered once it is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub key: SectionKey,
    pub title: &'static str,
    pub icon_svg: &'static str,
    pub body: SafeMarkup,
}

pub fn modal_view(report: &Report, key: SectionKey) -> ModalView {
    let meta = key.meta();
    ModalView {
        key,
        title: meta.title,
        icon_svg: meta.icon_svg,
        body: format_body(report.section(key)),
    }
}

impl ModalView {
    pub fn to_html(&self) -> String {
        let key = self.key.as_str();
        format!(
            "<div class=\"modal-overlay active\" id=\"card-modal\">\
             <div class=\"modal\" role=\"dialog\" aria-modal=\"true\">\
             <header><span class=\"modal-icon {key}\">{icon}</span><h2 id=\"modal-title\">{title}</h2>\
             <a class=\"btn\" href=\"{export}\" target=\"_blank\">Export</a>\
             <a class=\"modal-close\" href=\"/\" aria-label=\"Close\">&times;</a></header>\
             <div class=\"modal-body\">{body}</div></div></div>",
            icon = self.icon_svg,
            title = self.title,
            export = export_section_href(self.key),
            body = self.body,
        )
    }
}

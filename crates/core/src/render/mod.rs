//! Stateless projections of the current report. Each surface borrows the report
//! (or history entries) and produces an owned view; none of them mutate input.

pub mod cards;
pub mod history_panel;
pub mod modal;

pub use cards::{card_grid, Card, CardGrid};
pub use history_panel::{history_panel, HistoryItem, HistoryPanel};
pub use modal::{modal_view, ModalView};

use crate::domain::SectionKey;

pub fn section_href(key: SectionKey) -> String {
    format!("/section/{}", key.as_str())
}

pub fn export_section_href(key: SectionKey) -> String {
    format!("/export/{}", key.as_str())
}

pub const EXPORT_ALL_HREF: &str = "/export";

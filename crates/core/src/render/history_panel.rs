use crate::format::escape_html;
use crate::history::HistoryEntry;
use crate::time::relative_label;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: String,
    pub idea: String,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPanel {
    pub items: Vec<HistoryItem>,
}

pub fn history_panel(entries: &[HistoryEntry], now: DateTime<Utc>) -> HistoryPanel {
    HistoryPanel {
        items: entries
            .iter()
            .map(|e| HistoryItem {
                id: e.id.clone(),
                idea: e.idea.clone(),
                when: relative_label(e.created_at, now),
            })
            .collect(),
    }
}

impl HistoryPanel {
    pub fn to_html(&self) -> String {
        let mut s = String::from("<aside class=\"history-panel active\" id=\"history-panel\">");
        s.push_str("<header><h2>History</h2>");
        if !self.items.is_empty() {
            s.push_str(
                "<form method=\"post\" action=\"/history/clear\" class=\"history-clear\">\
                 <label><input type=\"checkbox\" name=\"confirm\" value=\"yes\"> \
                 I understand this cannot be undone</label>\
                 <button type=\"submit\">Clear all</button></form>",
            );
        }
        s.push_str("<a class=\"history-close\" href=\"/\" aria-label=\"Close\">&times;</a></header>");

        if self.items.is_empty() {
            s.push_str(
                "<div class=\"history-empty\"><p>No validation history yet.<br>\
                 Your saved ideas will appear here.</p></div></aside>",
            );
            return s;
        }

        s.push_str("<div class=\"history-content\">");
        for item in &self.items {
            let id = escape_html(&item.id);
            s.push_str(&format!(
                "<div class=\"history-item\" data-id=\"{id}\">\
                 <div class=\"history-item-date\">{when}</div>\
                 <div class=\"history-item-idea\">{idea}</div>\
                 <div class=\"history-item-actions\">\
                 <a class=\"history-item-btn view\" href=\"/history/view/{id}\">View</a>\
                 <form method=\"post\" action=\"/history/delete/{id}\">\
                 <button class=\"history-item-btn delete\" type=\"submit\">Delete</button></form>\
                 </div></div>",
                when = escape_html(&item.when),
                idea = escape_html(&item.idea),
            ));
        }
        s.push_str("</div></aside>");
        s
    }
}

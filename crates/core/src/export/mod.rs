//! Self-contained printable documents for a whole report or one section.
//!
//! Output depends only on the report, the scope and the generation date, so the
//! same inputs always produce the same bytes.

mod style;

use crate::domain::{Report, SectionBody, SectionKey};
use crate::format::{escape_html, format_body, placeholder, SafeMarkup};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

const REPORT_TITLE: &str = "Startup Validation Report";
const REPORT_EMOJI: &str = "\u{1F680}";
const FOOTER_TEXT: &str = "Generated by AI Startup Validator";
const TITLE_IDEA_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    Section(SectionKey),
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::All => f.write_str("all"),
            ExportScope::Section(key) => write!(f, "{key}"),
        }
    }
}

impl FromStr for ExportScope {
    type Err = crate::domain::section::UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(ExportScope::All);
        }
        s.parse().map(ExportScope::Section)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    NoContent { scope: ExportScope },
}

impl ExportError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::NoContent {
                scope: ExportScope::All,
            } => "No results to export",
            ExportError::NoContent { .. } => "No content available for this section",
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NoContent { scope } => {
                write!(f, "export failed (scope={scope}): no content")
            }
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub scope: ExportScope,
    pub title: String,
    pub html: String,
}

pub fn render_document(
    report: Option<&Report>,
    scope: ExportScope,
    generated_on: NaiveDate,
) -> Result<PrintDocument, ExportError> {
    let Some(report) = report else {
        return Err(ExportError::NoContent { scope });
    };

    match scope {
        ExportScope::All => Ok(whole_report(report, generated_on)),
        ExportScope::Section(key) => {
            let body = report.section(key);
            if !body.has_content() {
                return Err(ExportError::NoContent { scope });
            }
            Ok(single_section(report, key, body, generated_on))
        }
    }
}

fn whole_report(report: &Report, generated_on: NaiveDate) -> PrintDocument {
    let title = format!("{REPORT_TITLE} - {}", truncated_idea(&report.idea));

    let mut body = String::new();
    for (key, section) in report.sections.iter() {
        let meta = key.meta();
        body.push_str(&format!(
            "<div class=\"section\"><div class=\"section-header\">\
             <div class=\"section-icon {key}\" style=\"background: {color};\">{emoji}</div>\
             <h3>{title}</h3></div><div class=\"content\">{content}</div></div>\n",
            key = key.as_str(),
            color = meta.color,
            emoji = meta.emoji,
            title = meta.title,
            content = section_markup(section),
        ));
    }

    let html = document(
        &title,
        &style::report_css(),
        &format!("{REPORT_EMOJI} {REPORT_TITLE}"),
        &report.idea,
        generated_on,
        &body,
    );
    PrintDocument {
        scope: ExportScope::All,
        title,
        html,
    }
}

fn single_section(
    report: &Report,
    key: SectionKey,
    section: &SectionBody,
    generated_on: NaiveDate,
) -> PrintDocument {
    let meta = key.meta();
    let title = format!("{} - {}", meta.title, truncated_idea(&report.idea));
    let body = format!("<div class=\"content\">{}</div>\n", format_body(section));

    let html = document(
        &title,
        &style::single_section_css(meta.color),
        &format!("{} {}", meta.emoji, meta.title),
        &report.idea,
        generated_on,
        &body,
    );
    PrintDocument {
        scope: ExportScope::Section(key),
        title,
        html,
    }
}

fn section_markup(section: &SectionBody) -> SafeMarkup {
    if section.has_content() {
        format_body(section)
    } else {
        placeholder()
    }
}

fn document(
    title: &str,
    css: &str,
    heading: &str,
    idea: &str,
    generated_on: NaiveDate,
    body: &str,
) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{css}</style>\n</head>\n<body>\n\
         <div class=\"header\"><h1>{heading}</h1><div class=\"date\">Generated on {date}</div></div>\n\
         <div class=\"idea-box\"><h2>Startup Idea</h2><p>{idea}</p></div>\n\
         {body}\
         <div class=\"footer\"><p>{FOOTER_TEXT}</p></div>\n</body>\n</html>\n",
        title = escape_html(title),
        heading = escape_html(heading),
        date = generated_on.format("%B %-d, %Y"),
        idea = escape_html(idea),
    )
}

fn truncated_idea(idea: &str) -> String {
    let head: String = idea.chars().take(TITLE_IDEA_CHARS).collect();
    format!("{head}...")
}

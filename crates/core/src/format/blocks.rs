//! Line scanner turning semi-structured report text into a block tree.
//!
//! Grammar, per line:
//! - blank line: closes the open paragraph or list
//! - `#`, `##`, `###` followed by a space: heading (longest marker wins)
//! - optional indent, then `-`, `•` or `*`, then whitespace: list item; adjacent
//!   items share one list
//! - anything else: a line of the open paragraph
//!
//! Inside a line `**x**` is strong and `*x*` is emphasis, both non-greedy and
//! never spanning lines. Content may not start or end with whitespace, so a
//! lone `*` in `2 * 3` stays literal, as do unclosed markers.

const MAX_HEADING_LEVEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    List(Vec<Vec<Inline>>),
    /// Lines joined by hard breaks.
    Paragraph(Vec<Vec<Inline>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(String),
}

pub fn parse(raw: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<Block> = None;

    for line in raw.lines() {
        if line.trim().is_empty() {
            blocks.extend(open.take());
            continue;
        }

        if let Some((level, text)) = heading(line) {
            blocks.extend(open.take());
            blocks.push(Block::Heading {
                level,
                content: parse_inline(text, true),
            });
            continue;
        }

        if let Some(item) = list_item(line) {
            let item = parse_inline(item, true);
            match &mut open {
                Some(Block::List(items)) => items.push(item),
                _ => {
                    blocks.extend(open.take());
                    open = Some(Block::List(vec![item]));
                }
            }
            continue;
        }

        let text = parse_inline(line.trim(), true);
        match &mut open {
            Some(Block::Paragraph(lines)) => lines.push(text),
            _ => {
                blocks.extend(open.take());
                open = Some(Block::Paragraph(vec![text]));
            }
        }
    }

    blocks.extend(open);
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '•' | '*') {
        return None;
    }
    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let item = rest.trim();
    if item.is_empty() {
        return None;
    }
    Some(item)
}

fn parse_inline(text: &str, allow_strong: bool) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if allow_strong {
            if let Some((inner, after)) = delimited(rest, "**") {
                flush_text(&mut out, &mut buf);
                out.push(Inline::Strong(parse_inline(inner, false)));
                rest = after;
                continue;
            }
        }

        if let Some((inner, after)) = delimited(rest, "*") {
            flush_text(&mut out, &mut buf);
            out.push(Inline::Emphasis(inner.to_string()));
            rest = after;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            buf.push(ch);
        }
        rest = chars.as_str();
    }

    flush_text(&mut out, &mut buf);
    out
}

/// `rest` opens with `marker`, then content that neither starts nor ends with
/// whitespace, then the first closing `marker`.
fn delimited<'a>(rest: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let after_open = rest.strip_prefix(marker)?;
    let end = after_open.find(marker)?;
    let inner = &after_open[..end];
    if inner.is_empty()
        || inner.starts_with(char::is_whitespace)
        || inner.ends_with(char::is_whitespace)
    {
        return None;
    }
    Some((inner, &after_open[end + marker.len()..]))
}

fn flush_text(out: &mut Vec<Inline>, buf: &mut String) {
    if !buf.is_empty() {
        out.push(Inline::Text(std::mem::take(buf)));
    }
}

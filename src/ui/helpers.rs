use ratatui::layout::{Constraint, Direction, Layout, Rect};
use serde_json::Value;

use crate::models::{BookDetail, BookSummary};

/// Titles longer than this get shortened on cards.
const TITLE_LIMIT: usize = 40;
/// Characters kept before the ellipsis.
const TITLE_KEEP: usize = 37;

pub(crate) const UNKNOWN_AUTHOR: &str = "Autore sconosciuto";
pub(crate) const NOT_AVAILABLE: &str = "Non disponibile";
pub(crate) const PAPER_ONLY: &str = "Solo formato cartaceo";

/// Display names for the language codes the catalog uses most.
const LANGUAGE_NAMES: [(&str, &str); 10] = [
    ("eng", "Inglese"),
    ("ita", "Italiano"),
    ("spa", "Spagnolo"),
    ("fre", "Francese"),
    ("ger", "Tedesco"),
    ("rus", "Russo"),
    ("chi", "Cinese"),
    ("jpn", "Giapponese"),
    ("por", "Portoghese"),
    ("ara", "Arabo"),
];

/// Repeat a short ASCII motif until it fills the requested width.
pub(crate) fn repeat_pattern_row(row: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if row.is_empty() {
        return " ".repeat(width);
    }
    row.chars().cycle().take(width).collect()
}

/// Shorten long titles to 37 characters plus `...`. Counts characters, not
/// bytes, so accented titles never split mid-codepoint.
pub(crate) fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_LIMIT {
        let kept: String = title.chars().take(TITLE_KEEP).collect();
        format!("{kept}...")
    } else {
        title.to_string()
    }
}

/// Authors joined by `, `, or the unknown-author label.
pub(crate) fn author_line(book: &BookSummary) -> String {
    let names = book.author_names();
    if names.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        names.join(", ")
    }
}

/// Map a language code to its display name; unknown codes come back as-is.
pub(crate) fn language_name(code: &str) -> String {
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Display names for every language reference on the work.
pub(crate) fn language_names(detail: &BookDetail) -> Vec<String> {
    detail
        .language_refs()
        .into_iter()
        .map(|language| language.code())
        .filter(|code| !code.is_empty())
        .map(|code| language_name(&code))
        .collect()
}

/// Ebook formats across every edition, first occurrence wins.
pub(crate) fn format_line(detail: &BookDetail) -> String {
    if detail.ebooks.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    let mut formats: Vec<&str> = Vec::new();
    for name in detail.ebooks.iter().flat_map(|ebook| ebook.format_names()) {
        if !formats.contains(&name) {
            formats.push(name);
        }
    }
    if formats.is_empty() {
        PAPER_ONLY.to_string()
    } else {
        formats.join(", ")
    }
}

/// Walk a dotted path (`publishers.0.name`) through a JSON value. Numeric
/// segments index arrays. Missing, null, false, zero and empty-string values
/// all count as absent.
pub(crate) fn lookup_path(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    match current {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Dotted lookup with a fallback label.
pub(crate) fn lookup_or(value: &Value, path: &str, default: &str) -> String {
    lookup_path(value, path).unwrap_or_else(|| default.to_string())
}

/// Center a rectangle using percentage-based width/height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

//! HTML rendering of a correction result.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use tadqeeq_text::{normalize, render, Token};

use crate::align::{align, CorrectedToken, CorrectionEntry, CorrectionKind};

/// Marker classes wrapped around changed tokens.
pub mod class {
    pub const ERROR: &str = "error";
    pub const CORRECTION: &str = "correction";
    pub const DELETED: &str = "deleted";
    pub const ADDED: &str = "added";
    pub const UNKNOWN: &str = "unknown";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlighted {
    pub original: String,
    pub corrected: String,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

fn mark(text: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("<mark class=\"{class}\">{}</mark>", escape_html(text)),
        None => escape_html(text),
    }
}

/// Wrap changed tokens of both sequences in `<mark>` elements.
pub fn highlight(
    original: &[Token],
    corrected: &[CorrectedToken],
    corrections: &[CorrectionEntry],
) -> Highlighted {
    let mut original_marks: HashMap<usize, &str> = HashMap::new();
    let mut corrected_marks: HashMap<usize, &str> = HashMap::new();

    for entry in corrections {
        match entry.kind {
            CorrectionKind::Deletion => {
                original_marks.insert(entry.position, class::DELETED);
            }
            CorrectionKind::Insertion => {
                corrected_marks.insert(entry.target, class::ADDED);
            }
            CorrectionKind::Unknown => {
                original_marks.insert(entry.position, class::UNKNOWN);
                corrected_marks.insert(entry.target, class::UNKNOWN);
            }
            _ => {
                original_marks.insert(entry.position, class::ERROR);
                corrected_marks.insert(entry.target, class::CORRECTION);
            }
        }
    }

    let original_parts: Vec<(String, bool)> = original
        .iter()
        .enumerate()
        .map(|(i, t)| (mark(&t.text, original_marks.get(&i).copied()), t.spaced))
        .collect();
    let corrected_parts: Vec<(String, bool)> = corrected
        .iter()
        .enumerate()
        .map(|(j, t)| (mark(&t.text, corrected_marks.get(&j).copied()), t.spaced))
        .collect();

    Highlighted {
        original: render(original_parts.iter().map(|(s, spaced)| (s.as_str(), *spaced))),
        corrected: render(corrected_parts.iter().map(|(s, spaced)| (s.as_str(), *spaced))),
    }
}

/// Highlight the differences between two arbitrary texts.
pub fn highlight_differences(original: &str, corrected: &str) -> Highlighted {
    let original = normalize(original);
    let corrected: Vec<CorrectedToken> = normalize(corrected)
        .into_iter()
        .map(|t| CorrectedToken::plain(t.text, t.spaced))
        .collect();
    let corrections = align(&original, &corrected);
    highlight(&original, &corrected, &corrections)
}

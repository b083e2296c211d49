//! Text Statistics
//!
//! Descriptive counts over raw text, independent of correction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::arabic::{contains_arabic_letter, is_arabic_word_char};

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '\u{061F}'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub arabic_words: usize,
    pub non_arabic_words: usize,
}

/// Count characters, words, sentences and paragraphs.
///
/// Sentences and paragraphs are at least 1 for any non-empty text.
pub fn text_statistics(text: &str) -> TextStatistics {
    if text.is_empty() {
        return TextStatistics::default();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let arabic_words = words.iter().filter(|w| contains_arabic_letter(w)).count();
    let sentences = text
        .chars()
        .filter(|ch| SENTENCE_TERMINATORS.contains(ch))
        .count();
    let paragraphs = text.lines().filter(|line| !line.trim().is_empty()).count();

    TextStatistics {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|&ch| ch != ' ').count(),
        words: words.len(),
        sentences: sentences.max(1),
        paragraphs: paragraphs.max(1),
        arabic_words,
        non_arabic_words: words.len() - arabic_words,
    }
}

/// Word frequencies, most frequent first, ties broken alphabetically.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|&ch| is_arabic_word_char(ch) || ch.is_alphanumeric() || ch == '_')
            .collect();
        if !cleaned.is_empty() {
            *counts.entry(cleaned).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

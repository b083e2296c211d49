//! Arabic text primitives for the tadqeeq correction engine.
//!
//! Provides script classification, canonical forms (diacritics stripped),
//! cleaning and tokenization into script-tagged tokens, and descriptive
//! text statistics.

mod arabic;
mod stats;
mod tokenizer;

pub use arabic::{
    canonical, contains_arabic_letter, fold, is_arabic_char, is_arabic_diacritic,
    is_arabic_digit, is_arabic_punctuation, is_arabic_word_char, ArabicNormalizer,
};
pub use stats::{text_statistics, word_frequencies, TextStatistics};
pub use tokenizer::{clean, normalize, render, render_tokens, Token};

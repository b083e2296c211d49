//! Cleaning and Tokenization
//!
//! Turns raw input into script-tagged tokens: maximal runs of Arabic word
//! characters, or single non-Arabic characters. Whitespace separates tokens
//! and is never a token itself.

use serde::{Deserialize, Serialize};

use crate::arabic::{canonical, contains_arabic_letter, is_arabic_char, is_arabic_word_char};

/// Punctuation kept by [`clean`]; everything else outside the allowed set is dropped.
const ALLOWED_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '-',
];

/// A single token of input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form, diacritics preserved.
    pub text: String,
    /// Ordinal index in the token sequence.
    pub position: usize,
    /// Whether the token is an Arabic word.
    pub is_target_script: bool,
    /// Whether whitespace preceded the token in the cleaned text.
    pub spaced: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, position: usize, spaced: bool) -> Self {
        let text = text.into();
        let is_target_script = contains_arabic_letter(&text);
        Self {
            text,
            position,
            is_target_script,
            spaced,
        }
    }

    /// Canonical (diacritic-stripped) form used as the lookup key.
    pub fn canonical(&self) -> String {
        canonical(&self.text)
    }
}

fn is_allowed(ch: char) -> bool {
    is_arabic_char(ch)
        || ch.is_ascii_alphanumeric()
        || ch.is_whitespace()
        || ALLOWED_PUNCTUATION.contains(&ch)
}

/// Remove disallowed characters, collapse whitespace runs and trim.
pub fn clean(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().filter(|&ch| is_allowed(ch)) {
        if ch.is_whitespace() {
            pending_space = !result.is_empty();
            continue;
        }
        if pending_space {
            result.push(' ');
            pending_space = false;
        }
        result.push(ch);
    }

    result
}

/// Clean and tokenize text. Empty or whitespace-only input yields no tokens.
pub fn normalize(text: &str) -> Vec<Token> {
    let cleaned = clean(text);
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_spaced = false;
    let mut spaced = false;

    for ch in cleaned.chars() {
        if is_arabic_word_char(ch) {
            if current.is_empty() {
                current_spaced = spaced;
                spaced = false;
            }
            current.push(ch);
            continue;
        }

        if !current.is_empty() {
            let position = tokens.len();
            tokens.push(Token::new(std::mem::take(&mut current), position, current_spaced));
        }

        if ch == ' ' {
            spaced = true;
        } else {
            let position = tokens.len();
            tokens.push(Token::new(ch.to_string(), position, spaced));
            spaced = false;
        }
    }

    if !current.is_empty() {
        let position = tokens.len();
        tokens.push(Token::new(current, position, current_spaced));
    }

    tokens
}

/// Rebuild text from a token sequence, honoring the `spaced` flags.
pub fn render<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut out = String::new();
    for (text, spaced) in tokens {
        if spaced && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
    }
    out
}

/// Render a sequence of [`Token`]s back into text.
pub fn render_tokens(tokens: &[Token]) -> String {
    render(tokens.iter().map(|t| (t.text.as_str(), t.spaced)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  هذا \t\n الكتاب  "), "هذا الكتاب");
    }

    #[test]
    fn test_clean_drops_disallowed_symbols() {
        assert_eq!(clean("هذا @#الكتاب$ ✓"), "هذا الكتاب");
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_arabic_runs_and_punctuation() {
        let tokens = normalize("مرحبا، كيف الحال؟");
        assert_eq!(texts(&tokens), vec!["مرحبا", "،", "كيف", "الحال", "؟"]);
        assert!(tokens[0].is_target_script);
        assert!(!tokens[1].is_target_script);
        assert_eq!(tokens[4].position, 4);
    }

    #[test]
    fn test_latin_characters_are_singletons() {
        let tokens = normalize("تعلم Rs 2");
        assert_eq!(texts(&tokens), vec!["تعلم", "R", "s", "2"]);
        assert!(tokens[1].spaced);
        assert!(!tokens[2].spaced);
        assert!(tokens.iter().skip(1).all(|t| !t.is_target_script));
    }

    #[test]
    fn test_diacritics_stay_in_surface_form() {
        let tokens = normalize("كِتَابٌ جميل");
        assert_eq!(tokens[0].text, "كِتَابٌ");
        assert_eq!(tokens[0].canonical(), "كتاب");
    }

    #[test]
    fn test_render_round_trips_cleaned_text() {
        let text = "قال: (نعم) هذا صحيح.";
        let tokens = normalize(text);
        assert_eq!(render_tokens(&tokens), clean(text));
    }
}

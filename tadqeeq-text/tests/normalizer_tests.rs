//! Integration tests for tadqeeq-text
//!
//! Tests cover:
//! - Tokenization of mixed-script input
//! - Canonical forms across diacritized input
//! - Degenerate input

use tadqeeq_text::{canonical, clean, normalize, render_tokens, text_statistics, Token};

// ============================================================================
// Tokenization
// ============================================================================

#[test]
fn test_positions_are_sequential() {
    let tokens = normalize("ذَهَبَ الوَلَدُ إلى المَدْرَسَةِ.");
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, (0..tokens.len()).collect::<Vec<_>>());
    assert_eq!(tokens.last().map(|t| t.text.as_str()), Some("."));
}

#[test]
fn test_target_script_flags() {
    let tokens = normalize("كتاب (2)");
    let flags: Vec<bool> = tokens.iter().map(|t| t.is_target_script).collect();
    assert_eq!(flags, vec![true, false, false, false]);
}

#[test]
fn test_lone_diacritic_is_not_a_word() {
    let tokens = normalize("\u{064E} كتاب");
    assert_eq!(tokens.len(), 2);
    assert!(!tokens[0].is_target_script);
    assert!(tokens[1].is_target_script);
}

#[test]
fn test_canonical_form_matches_plain_spelling() {
    let diacritized = normalize("المَدْرَسَةِ");
    let plain = normalize("المدرسة");
    assert_eq!(diacritized[0].canonical(), plain[0].text);
    assert_eq!(canonical(&diacritized[0].text), "المدرسة");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_preserves_punctuation_spacing() {
    let text = "مرحبا،   كيف   الحال؟";
    let tokens = normalize(text);
    assert_eq!(render_tokens(&tokens), "مرحبا، كيف الحال؟");
    assert_eq!(render_tokens(&tokens), clean(text));
}

#[test]
fn test_token_constructor_classifies() {
    let token = Token::new("نعم", 3, true);
    assert!(token.is_target_script);
    assert_eq!(token.position, 3);
    assert!(!Token::new("!", 0, false).is_target_script);
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_text_statistics_on_whitespace_only() {
    let stats = text_statistics("   ");
    assert_eq!(stats.words, 0);
    assert_eq!(stats.sentences, 1);
    assert_eq!(stats.paragraphs, 1);
}

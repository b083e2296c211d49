//! Arabic Script Handling
//!
//! Character classification and normalization for Arabic text:
//! - Script detection (all Arabic Unicode blocks)
//! - Diacritics (tashkeel) and tatweel (kashida) removal
//! - Letter folding (alef, yaa, taa marbuta, hamza carriers) for loose matching

/// Arabic text normalizer.
///
/// The default normalizer only strips marks, producing the canonical form
/// used as the lookup key everywhere in the correction pipeline. Letter
/// folding ([`ArabicNormalizer::folding`]) is for loose search only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArabicNormalizer {
    /// Remove diacritical marks (tashkeel)
    pub remove_diacritics: bool,
    /// Remove tatweel (kashida)
    pub remove_tatweel: bool,
    /// Normalize alef variants to bare alef
    pub normalize_alef: bool,
    /// Normalize alef maqsura to yaa
    pub normalize_yaa: bool,
    /// Normalize taa marbuta to haa
    pub normalize_taa_marbuta: bool,
    /// Normalize hamza carriers (waw, yaa)
    pub normalize_hamza: bool,
}

impl Default for ArabicNormalizer {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ArabicNormalizer {
    /// Normalizer producing canonical forms (marks stripped, letters intact).
    pub const fn canonical() -> Self {
        Self {
            remove_diacritics: true,
            remove_tatweel: true,
            normalize_alef: false,
            normalize_yaa: false,
            normalize_taa_marbuta: false,
            normalize_hamza: false,
        }
    }

    /// Normalizer that also folds commonly confused letters together.
    pub const fn folding() -> Self {
        Self {
            remove_diacritics: true,
            remove_tatweel: true,
            normalize_alef: true,
            normalize_yaa: true,
            normalize_taa_marbuta: true,
            normalize_hamza: true,
        }
    }

    /// Normalize Arabic text: drop marks, then fold the remaining letters.
    pub fn normalize(&self, text: &str) -> String {
        text.chars()
            .filter(|&ch| !self.drops(ch))
            .map(|ch| self.fold_letter(ch))
            .collect()
    }

    fn drops(&self, ch: char) -> bool {
        (self.remove_diacritics && is_arabic_diacritic(ch)) || (self.remove_tatweel && ch == TATWEEL)
    }

    fn fold_letter(&self, ch: char) -> char {
        match ch {
            _ if self.normalize_alef && is_alef_variant(ch) => ALEF,
            ALEF_MAQSURA if self.normalize_yaa => YAA,
            TAA_MARBUTA if self.normalize_taa_marbuta => HAA,
            WAW_HAMZA if self.normalize_hamza => WAW,
            YAA_HAMZA if self.normalize_hamza => YAA,
            _ => ch,
        }
    }
}

/// Strip diacritics and tatweel, yielding the canonical lookup form.
pub fn canonical(text: &str) -> String {
    ArabicNormalizer::canonical().normalize(text)
}

/// Fold a word for loose comparison (search, not correction).
pub fn fold(text: &str) -> String {
    ArabicNormalizer::folding().normalize(text)
}

const TATWEEL: char = '\u{0640}';
const ALEF: char = '\u{0627}';
const ALEF_MAQSURA: char = '\u{0649}';
const YAA: char = '\u{064A}';
const TAA_MARBUTA: char = '\u{0629}';
const HAA: char = '\u{0647}';
const WAW: char = '\u{0648}';
const WAW_HAMZA: char = '\u{0624}';
const YAA_HAMZA: char = '\u{0626}';

/// Check if a character is an Arabic diacritical mark.
pub fn is_arabic_diacritic(ch: char) -> bool {
    matches!(ch,
        '\u{064B}'..='\u{065F}' | // Fathatan through wavy hamza below
        '\u{0670}'                // Superscript alef
    )
}

/// Check if a character belongs to any Arabic Unicode block.
pub fn is_arabic_char(ch: char) -> bool {
    matches!(ch as u32,
        0x0600..=0x06FF |  // Arabic
        0x0750..=0x077F |  // Arabic Supplement
        0x08A0..=0x08FF |  // Arabic Extended-A
        0xFB50..=0xFDFF |  // Arabic Presentation Forms-A
        0xFE70..=0xFEFF    // Arabic Presentation Forms-B
    )
}

/// Arabic punctuation marks that live inside the Arabic block.
pub fn is_arabic_punctuation(ch: char) -> bool {
    matches!(ch,
        '\u{060C}' | // comma
        '\u{061B}' | // semicolon
        '\u{061F}' | // question mark
        '\u{066A}'..='\u{066D}' | // percent, decimal and thousands separators, five-pointed star
        '\u{06D4}'   // full stop
    )
}

/// Arabic-Indic and extended Arabic-Indic digits.
pub fn is_arabic_digit(ch: char) -> bool {
    matches!(ch, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

/// Characters that make up Arabic words: the script minus its punctuation and digits.
pub fn is_arabic_word_char(ch: char) -> bool {
    is_arabic_char(ch) && !is_arabic_punctuation(ch) && !is_arabic_digit(ch)
}

/// Check if text contains at least one Arabic letter.
pub fn contains_arabic_letter(text: &str) -> bool {
    text.chars()
        .any(|ch| is_arabic_word_char(ch) && !is_arabic_diacritic(ch) && ch != TATWEEL)
}

/// Check if a character is an alef variant.
fn is_alef_variant(ch: char) -> bool {
    matches!(ch,
        '\u{0622}' | // Alef with madda
        '\u{0623}' | // Alef with hamza above
        '\u{0625}' | // Alef with hamza below
        '\u{0671}'   // Alef wasla
    )
}

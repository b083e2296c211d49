//! Correction Dictionary
//!
//! Exact-match table from canonical misspellings to their corrections.

use std::collections::HashMap;
use tadqeeq_text::canonical;

/// Confidence reported for every dictionary correction.
pub const DICTIONARY_CONFIDENCE: f64 = 0.95;

/// Common misspellings and colloquialisms with their standard forms.
pub static DEFAULT_CORRECTIONS: &[(&str, &str)] = &[
    // Hamzat al-qat' written as bare alef
    ("اذا", "إذا"),
    ("الى", "إلى"),
    ("انه", "إنه"),
    ("انها", "إنها"),
    ("انت", "أنت"),
    ("انا", "أنا"),
    ("اين", "أين"),
    ("ايضا", "أيضاً"),
    ("اكثر", "أكثر"),
    ("افضل", "أفضل"),
    ("اول", "أول"),
    ("اخر", "آخر"),
    ("اخرى", "أخرى"),
    ("اغلاط", "أخطاء"),
    ("الاغلاط", "الأخطاء"),
    ("املائية", "إملائية"),
    ("املائيه", "إملائية"),
    ("الاملائية", "الإملائية"),
    ("الاملائيه", "الإملائية"),
    // Taa marbuta written as haa
    ("مدرسه", "مدرسة"),
    ("جامعه", "جامعة"),
    ("حكومه", "حكومة"),
    ("شركه", "شركة"),
    ("مؤسسه", "مؤسسة"),
    ("خطه", "خطة"),
    ("فكره", "فكرة"),
    ("طريقه", "طريقة"),
    ("عمليه", "عملية"),
    ("تقنيه", "تقنية"),
    // Demonstratives and particles
    ("هاذا", "هذا"),
    ("هاذه", "هذه"),
    ("ذالك", "ذلك"),
    ("تالك", "تلك"),
    ("هاؤلاء", "هؤلاء"),
    ("اولئك", "أولئك"),
    ("لاكن", "لكن"),
    ("علئ", "على"),
    // Colloquial forms
    ("بعدين", "بعد ذلك"),
    ("احنا", "نحن"),
    ("انتو", "أنتم"),
    ("انتي", "أنت"),
    ("ايش", "ماذا"),
    ("وين", "أين"),
    ("ليش", "لماذا"),
    ("شلون", "كيف"),
    ("شنو", "ماذا"),
    ("منو", "من"),
    ("امتى", "متى"),
    ("ليه", "لماذا"),
    ("ازاي", "كيف"),
    ("ايه", "ماذا"),
    ("مين", "من"),
    ("فين", "أين"),
];

#[derive(Debug, Clone, Default)]
pub struct CorrectionDictionary {
    entries: HashMap<String, String>,
}

impl CorrectionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary preloaded with [`DEFAULT_CORRECTIONS`].
    pub fn builtin() -> Self {
        let mut dictionary = Self::new();
        for (misspelling, correction) in DEFAULT_CORRECTIONS {
            dictionary.insert(misspelling, correction);
        }
        dictionary
    }

    /// Add or replace an entry. The key is canonicalized; blank entries are ignored.
    pub fn insert(&mut self, misspelling: &str, correction: &str) -> bool {
        let key = canonical(misspelling.trim());
        let value = correction.trim();
        if key.is_empty() || value.is_empty() {
            return false;
        }
        self.entries.insert(key, value.to_string());
        true
    }

    /// Exact lookup on a canonical token.
    pub fn lookup(&self, canonical_token: &str) -> Option<(&str, f64)> {
        self.entries
            .get(canonical_token)
            .map(|corrected| (corrected.as_str(), DICTIONARY_CONFIDENCE))
    }

    pub fn contains(&self, canonical_token: &str) -> bool {
        self.entries.contains_key(canonical_token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

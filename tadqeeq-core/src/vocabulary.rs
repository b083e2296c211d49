//! Known-correct vocabulary and the Word Store contract.
//!
//! The vocabulary consulted during correction is the union of a builtin
//! word list (owned by the corrector, indexed by length) and a snapshot of
//! the custom words held by an external [`WordStore`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use tadqeeq_text::canonical;

use crate::error::WordStoreError;

/// Words known to be spelled correctly out of the box.
pub static DEFAULT_VOCABULARY: &[&str] = &[
    // Demonstratives, pronouns, interrogatives
    "هذا", "هذه", "ذلك", "تلك", "هؤلاء", "أولئك", "هو", "هي", "هم", "نحن", "أنت",
    "أنتم", "أنا", "ماذا", "كيف", "لماذا", "متى", "أين", "من", "ما",
    // Particles and prepositions
    "إذا", "إلى", "إنه", "إنها", "في", "على", "عن", "مع", "بين", "تحت", "فوق",
    "أمام", "خلف", "لكن", "بعد", "قبل", "نعم", "لا", "ربما", "بالطبع", "طبعاً",
    "أيضاً", "غير", "فيه", "عليه", "منه", "عنه", "الله",
    // Directions and places
    "يمين", "يسار", "شمال", "جنوب", "شرق", "غرب", "داخل", "خارج", "قريب", "بعيد",
    "مدرسة", "جامعة", "حكومة", "شركة", "مؤسسة", "مدينة", "بيت",
    // Adjectives
    "كبير", "صغير", "طويل", "قصير", "واسع", "ضيق", "سريع", "بطيء", "جميل", "قبيح",
    "جديد", "قديم", "حديث", "صحيح", "خطأ", "صواب", "أكيد", "مؤكد", "واضح", "غامض",
    "سهل", "صعب", "بسيط", "معقد", "مفهوم", "مقبول", "مرفوض", "موافق", "مهم",
    "ضروري", "مطلوب", "ممكن", "مستحيل", "محتمل", "متوقع", "عادي", "طبيعي",
    "منطقي", "معقول", "أكثر", "أفضل", "أول", "آخر", "أخرى",
    // Common nouns
    "خطة", "فكرة", "طريقة", "عملية", "تقنية", "كتاب", "قلم", "ولد", "بنت", "رجل",
    "امرأة", "يوم", "وقت", "عمل", "علم", "لغة", "عربية", "كلمة", "نص", "درس",
    "طالب", "معلم", "أخطاء", "إملائية",
    // Verbs
    "كان", "كانت", "قال", "ذهب", "جاء", "كتب", "قرأ",
];

/// Clitic prefixes tolerated when checking whether a word is known,
/// longest first so the article is consumed together with its proclitic.
const CLITIC_PREFIXES: &[&str] = &[
    "وال", "فال", "بال", "كال", "لل", "ال", "و", "ف", "ب", "ك", "ل",
];

/// Minimum stem length (in chars) left after removing a clitic prefix.
const MIN_STEM_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularySource {
    Builtin,
    Custom,
}

/// One known-correct word. The canonical form is the uniqueness key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub canonical_word: String,
    pub frequency: u64,
    pub source: VocabularySource,
}

/// Persisted custom vocabulary consumed by the corrector.
///
/// Implementations guard their records with a read-write lock: snapshots
/// and lookups are readers, mutations are writers.
pub trait WordStore: Send + Sync {
    fn lookup(&self, canonical_word: &str) -> Result<Option<VocabularyEntry>, WordStoreError>;

    /// Snapshot of every custom canonical word.
    fn all_canonical_words(&self) -> Result<HashSet<String>, WordStoreError>;

    /// Record one more confirmed use of a word. Returns false if the word is unknown.
    fn increment_frequency(&self, canonical_word: &str) -> Result<bool, WordStoreError>;
}

/// Builtin vocabulary, bucketed by word length in chars.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
    by_length: BTreeMap<usize, Vec<String>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_words(DEFAULT_VOCABULARY.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::new();
        for word in words {
            vocabulary.insert(word.as_ref());
        }
        vocabulary
    }

    /// Add a word by its canonical form. Returns false for blanks and duplicates.
    pub fn insert(&mut self, word: &str) -> bool {
        let key = canonical(word.trim());
        if key.is_empty() || self.words.contains(&key) {
            return false;
        }
        let bucket = self.by_length.entry(key.chars().count()).or_default();
        let at = bucket.binary_search(&key).unwrap_or_else(|at| at);
        bucket.insert(at, key.clone());
        self.words.insert(key);
        true
    }

    pub fn remove(&mut self, word: &str) -> bool {
        let key = canonical(word.trim());
        if !self.words.remove(&key) {
            return false;
        }
        let len = key.chars().count();
        if let Some(bucket) = self.by_length.get_mut(&len) {
            bucket.retain(|w| *w != key);
            if bucket.is_empty() {
                self.by_length.remove(&len);
            }
        }
        true
    }

    pub fn contains(&self, canonical_word: &str) -> bool {
        self.words.contains(canonical_word)
    }

    pub fn entry(&self, canonical_word: &str) -> Option<VocabularyEntry> {
        self.contains(canonical_word).then(|| VocabularyEntry {
            canonical_word: canonical_word.to_string(),
            frequency: 0,
            source: VocabularySource::Builtin,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words whose length falls in `lengths`.
    pub fn with_lengths(&self, lengths: RangeInclusive<usize>) -> impl Iterator<Item = &str> {
        (!lengths.is_empty())
            .then(|| self.by_length.range(lengths))
            .into_iter()
            .flatten()
            .flat_map(|(_, bucket)| bucket.iter().map(String::as_str))
    }
}

/// Per-request view of builtin plus custom words.
#[derive(Debug, Clone)]
pub struct VocabularySnapshot<'a> {
    builtin: &'a Vocabulary,
    custom: HashSet<String>,
    suggestions_enabled: bool,
}

impl<'a> VocabularySnapshot<'a> {
    pub fn new(builtin: &'a Vocabulary, custom: HashSet<String>) -> Self {
        Self {
            builtin,
            custom,
            suggestions_enabled: true,
        }
    }

    /// Builtin-only view used when the store could not be consulted.
    pub fn degraded(builtin: &'a Vocabulary) -> Self {
        Self {
            builtin,
            custom: HashSet::new(),
            suggestions_enabled: false,
        }
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.suggestions_enabled
    }

    pub fn contains(&self, canonical_word: &str) -> bool {
        self.builtin.contains(canonical_word) || self.custom.contains(canonical_word)
    }

    /// Membership that tolerates a leading proclitic or article.
    pub fn is_known(&self, canonical_word: &str) -> bool {
        if self.contains(canonical_word) {
            return true;
        }
        CLITIC_PREFIXES.iter().any(|prefix| {
            canonical_word
                .strip_prefix(*prefix)
                .filter(|stem| stem.chars().count() >= MIN_STEM_CHARS)
                .is_some_and(|stem| self.contains(stem))
        })
    }

    /// Candidate words with a length in `lengths`, builtin first, no duplicates.
    pub fn candidates(&self, lengths: RangeInclusive<usize>) -> Vec<&str> {
        let mut out: Vec<&str> = self.builtin.with_lengths(lengths.clone()).collect();
        out.extend(
            self.custom
                .iter()
                .filter(|word| !self.builtin.contains(word))
                .filter(|word| lengths.contains(&word.chars().count()))
                .map(String::as_str),
        );
        out
    }

    pub fn len(&self) -> usize {
        self.builtin.len()
            + self
                .custom
                .iter()
                .filter(|word| !self.builtin.contains(word))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

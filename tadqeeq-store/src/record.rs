use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tadqeeq_text::contains_arabic_letter;

use crate::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Pronoun,
    Particle,
    #[default]
    Unknown,
}

impl WordType {
    pub const ALL: [WordType; 9] = [
        Self::Noun,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Preposition,
        Self::Conjunction,
        Self::Pronoun,
        Self::Particle,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Pronoun => "pronoun",
            Self::Particle => "particle",
            Self::Unknown => "unknown",
        }
    }

    /// Arabic grammatical label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Noun => "اسم",
            Self::Verb => "فعل",
            Self::Adjective => "صفة",
            Self::Adverb => "ظرف",
            Self::Preposition => "حرف جر",
            Self::Conjunction => "حرف عطف",
            Self::Pronoun => "ضمير",
            Self::Particle => "حرف",
            Self::Unknown => "غير محدد",
        }
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordType {
    type Err = StoreError;

    /// Accepts the English name or the Arabic label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s) || kind.label() == s)
            .ok_or_else(|| StoreError::Invalid(format!("unknown word type {s:?}")))
    }
}

/// A custom word held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: u64,
    /// Surface form as entered.
    pub word: String,
    /// Diacritic-stripped form; unique across the store.
    pub canonical: String,
    pub word_type: WordType,
    pub frequency: u64,
    pub root: Option<String>,
    pub synonyms: Vec<String>,
    pub definition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewWord {
    pub word: String,
    pub word_type: WordType,
    pub frequency: u64,
    pub root: Option<String>,
    pub synonyms: Vec<String>,
    pub definition: Option<String>,
}

impl Default for NewWord {
    fn default() -> Self {
        Self {
            word: String::new(),
            word_type: WordType::Unknown,
            frequency: 1,
            root: None,
            synonyms: Vec::new(),
            definition: None,
        }
    }
}

pub(crate) fn validate_word(word: &str) -> Result<(), StoreError> {
    if word.trim().is_empty() {
        return Err(StoreError::Invalid("word is required".into()));
    }
    if !contains_arabic_letter(word) {
        return Err(StoreError::Invalid(format!(
            "{word:?} contains no Arabic letters"
        )));
    }
    Ok(())
}

impl NewWord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    pub fn word_type(mut self, word_type: WordType) -> Self {
        self.word_type = word_type;
        self
    }

    pub fn frequency(mut self, frequency: u64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_word(&self.word)?;
        if self.frequency == 0 {
            return Err(StoreError::Invalid("frequency must be at least 1".into()));
        }
        Ok(())
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordUpdate {
    pub word: Option<String>,
    pub word_type: Option<WordType>,
    pub frequency: Option<u64>,
    pub root: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub definition: Option<String>,
}

impl WordUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// User-defined misspelling -> correction pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCorrection {
    pub id: u64,
    /// Canonical misspelling.
    pub original: String,
    pub corrected: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub words: Vec<WordRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentWord {
    pub word: String,
    pub frequency: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_words: usize,
    /// Words added during the last seven days.
    pub recent_words: usize,
    pub most_frequent: Vec<FrequentWord>,
    pub total_corrections: usize,
}

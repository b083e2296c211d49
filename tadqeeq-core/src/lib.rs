//! Arabic lexical correction engine.
//!
//! Text is normalized into tokens, each Arabic token is resolved through an
//! exact-match dictionary, ordered pattern rules and a similarity search over
//! the known vocabulary, and the corrected sequence is aligned against the
//! original to report every change with its kind and confidence.
//!
//! ```no_run
//! use tadqeeq_core::Corrector;
//!
//! let corrector = Corrector::default();
//! let result = corrector.correct_text("هاذا الكتاب").unwrap();
//! assert_eq!(result.corrected_text, "هذا الكتاب");
//! ```

pub mod align;
pub mod config;
pub mod corrector;
pub mod dictionary;
pub mod error;
pub mod highlight;
pub mod rules;
pub mod similarity;
pub mod stats;
pub mod vocabulary;

pub use align::{
    align, align_texts, apply_corrections, CorrectedToken, CorrectionEntry, CorrectionKind,
    Resolution,
};
pub use config::{CorrectorConfig, VocabularyPolicy};
pub use corrector::{CorrectionResult, Corrector, WordAdvice};
pub use dictionary::{CorrectionDictionary, DEFAULT_CORRECTIONS, DICTIONARY_CONFIDENCE};
pub use error::{ConfigError, CorrectionError, RuleError, WordStoreError};
pub use highlight::{highlight, highlight_differences, Highlighted};
pub use rules::{default_rules, Rewrite, RuleSet, RuleSpec};
pub use similarity::{ratio, SimilarityMatcher, Suggestion};
pub use stats::{aggregate, Statistics};
pub use vocabulary::{
    Vocabulary, VocabularyEntry, VocabularySnapshot, VocabularySource, WordStore,
    DEFAULT_VOCABULARY,
};
pub use tadqeeq_text::Token;

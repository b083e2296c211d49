use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::rules::RuleSpec;

/// What to do when the word store cannot be consulted during a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyPolicy {
    /// Report the request as failed.
    FailClosed,
    /// Continue with dictionary and rules only, no similarity suggestions.
    FailOpen,
}

impl Default for VocabularyPolicy {
    fn default() -> Self {
        Self::FailOpen
    }
}

/// Tunables for the correction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Minimum similarity at which the best candidate replaces the token.
    pub auto_correct_threshold: f64,
    /// Minimum similarity for a candidate to be reported at all.
    pub suggestion_threshold: f64,
    /// Maximum number of suggestions per token.
    pub max_suggestions: usize,
    /// Confidence attached to pattern-rule corrections.
    pub pattern_confidence: f64,
    /// Skip the rule engine for words already in the vocabulary.
    pub protect_known_words: bool,
    pub vocabulary_policy: VocabularyPolicy,
    /// Tokens longer than this (in chars) are passed through untouched.
    pub max_token_chars: usize,
    /// Candidate count above which the similarity scan runs in parallel.
    pub parallel_scan_threshold: usize,
    /// Additional misspelling -> correction pairs for the dictionary.
    pub extra_corrections: BTreeMap<String, String>,
    /// Additional known-correct words for the builtin vocabulary.
    pub extra_vocabulary: Vec<String>,
    /// Ordered rewrite rules; the builtin rules when absent.
    pub rules: Option<Vec<RuleSpec>>,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            auto_correct_threshold: 0.8,
            suggestion_threshold: 0.6,
            max_suggestions: 3,
            pattern_confidence: 0.85,
            protect_known_words: true,
            vocabulary_policy: VocabularyPolicy::FailOpen,
            max_token_chars: 64,
            parallel_scan_threshold: 2048,
            extra_corrections: BTreeMap::new(),
            extra_vocabulary: Vec::new(),
            rules: None,
        }
    }
}

impl CorrectorConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn fail_closed(mut self) -> Self {
        self.vocabulary_policy = VocabularyPolicy::FailClosed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounded = [
            ("auto_correct_threshold", self.auto_correct_threshold),
            ("suggestion_threshold", self.suggestion_threshold),
            ("pattern_confidence", self.pattern_confidence),
        ];
        for (field, value) in bounded {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        if self.suggestion_threshold > self.auto_correct_threshold {
            return Err(ConfigError::ThresholdOrder {
                suggestion: self.suggestion_threshold,
                auto_correct: self.auto_correct_threshold,
            });
        }
        if self.max_suggestions == 0 {
            return Err(ConfigError::NoSuggestions);
        }
        Ok(())
    }
}

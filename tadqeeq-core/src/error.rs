use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {name} has an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{field}={value} is outside [0, 1]")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("suggestion_threshold={suggestion} exceeds auto_correct_threshold={auto_correct}")]
    ThresholdOrder { suggestion: f64, auto_correct: f64 },

    #[error("max_suggestions must be positive")]
    NoSuggestions,

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}

/// Failure reported by a [`WordStore`](crate::WordStore) implementation.
#[derive(Debug, Error)]
pub enum WordStoreError {
    #[error("word store unavailable: {0}")]
    Unavailable(String),

    #[error("word store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("vocabulary required but the word store could not be consulted: {0}")]
    WordStoreUnavailable(#[source] WordStoreError),
}

/// Per-token failure; the token is passed through unchanged.
#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("rule {rule} rewrote {token:?} to an empty string")]
    EmptyRewrite { rule: String, token: String },

    #[error("token of {len} chars exceeds the limit of {max}")]
    TooLong { len: usize, max: usize },
}

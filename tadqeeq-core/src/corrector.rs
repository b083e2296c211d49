//! The correction pipeline.
//!
//! Each target-script token is resolved independently, in order:
//! dictionary, known-word protection, pattern rules, vocabulary membership,
//! then similarity search. The corrected sequence is aligned against the
//! original to produce the correction list, statistics and highlighting.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use tadqeeq_text::{canonical, normalize, render, Token};

use crate::align::{align, CorrectedToken, CorrectionEntry, CorrectionKind, Resolution};
use crate::config::{CorrectorConfig, VocabularyPolicy};
use crate::dictionary::CorrectionDictionary;
use crate::error::{ConfigError, CorrectionError, RuleError, TokenError, WordStoreError};
use crate::highlight::{escape_html, highlight, Highlighted};
use crate::rules::{default_rules, RuleSet, RuleSpec};
use crate::similarity::{SimilarityMatcher, Suggestion};
use crate::stats::{aggregate, Statistics};
use crate::vocabulary::{Vocabulary, VocabularyEntry, VocabularySnapshot, WordStore};

/// Outcome of one `correct_text` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub original_text: String,
    pub corrected_text: String,
    pub corrections: Vec<CorrectionEntry>,
    pub statistics: Statistics,
    pub highlighted: Highlighted,
}

impl CorrectionResult {
    fn identity(text: &str) -> Self {
        let escaped = escape_html(text);
        Self {
            original_text: text.to_string(),
            corrected_text: text.to_string(),
            corrections: Vec::new(),
            statistics: Statistics::default(),
            highlighted: Highlighted {
                original: escaped.clone(),
                corrected: escaped,
            },
        }
    }
}

/// What the engine knows about a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAdvice {
    pub word: String,
    pub canonical: String,
    /// Whether the word (or its stem after a clitic prefix) is in the vocabulary.
    pub known: bool,
    pub entry: Option<VocabularyEntry>,
    /// Dictionary correction, if the word is a listed misspelling.
    pub correction: Option<String>,
    pub suggestions: Vec<Suggestion>,
}

enum Outcome {
    Keep,
    Replace {
        text: String,
        resolution: Resolution,
        suggestions: Vec<Suggestion>,
    },
    Flag {
        suggestions: Vec<Suggestion>,
    },
}

enum ResolveError {
    Token(TokenError),
    Fatal(CorrectionError),
}

impl From<TokenError> for ResolveError {
    fn from(err: TokenError) -> Self {
        Self::Token(err)
    }
}

impl From<CorrectionError> for ResolveError {
    fn from(err: CorrectionError) -> Self {
        Self::Fatal(err)
    }
}

/// Vocabulary snapshot taken on first use and reused for the rest of a request.
struct LazySnapshot<'a> {
    corrector: &'a Corrector,
    snapshot: Option<VocabularySnapshot<'a>>,
}

impl<'a> LazySnapshot<'a> {
    fn new(corrector: &'a Corrector) -> Self {
        Self {
            corrector,
            snapshot: None,
        }
    }

    fn get(&mut self) -> Result<&VocabularySnapshot<'a>, CorrectionError> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => self.corrector.snapshot()?,
        };
        Ok(self.snapshot.insert(snapshot))
    }
}

pub struct Corrector {
    config: CorrectorConfig,
    dictionary: CorrectionDictionary,
    rules: RuleSet,
    vocabulary: Vocabulary,
    matcher: SimilarityMatcher,
    store: Option<Arc<dyn WordStore>>,
}

impl std::fmt::Debug for Corrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrector")
            .field("config", &self.config)
            .field("dictionary", &self.dictionary.len())
            .field("rules", &self.rules.len())
            .field("vocabulary", &self.vocabulary.len())
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new(CorrectorConfig::default()).expect("default configuration is valid")
    }
}

impl Corrector {
    /// Builtin dictionary, rules and vocabulary, extended by the configuration.
    pub fn new(config: CorrectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = RuleSet::new(config.rules.clone().unwrap_or_else(default_rules))?;
        let mut corrector = Self {
            dictionary: CorrectionDictionary::builtin(),
            rules,
            vocabulary: Vocabulary::builtin(),
            matcher: SimilarityMatcher::from_config(&config),
            store: None,
            config,
        };
        corrector.merge_configured_dictionary();
        corrector.merge_configured_vocabulary();
        Ok(corrector)
    }

    pub fn with_store(mut self, store: Arc<dyn WordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the builtin vocabulary. Configured extra words are kept.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self.merge_configured_vocabulary();
        self
    }

    /// Replace the builtin dictionary. Configured extra corrections are kept.
    pub fn with_dictionary(mut self, dictionary: CorrectionDictionary) -> Self {
        self.dictionary = dictionary;
        self.merge_configured_dictionary();
        self
    }

    pub fn with_rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, RuleError> {
        self.rules = RuleSet::new(specs)?;
        Ok(self)
    }

    fn merge_configured_dictionary(&mut self) {
        for (misspelling, correction) in &self.config.extra_corrections {
            self.dictionary.insert(misspelling, correction);
        }
    }

    fn merge_configured_vocabulary(&mut self) {
        for word in &self.config.extra_vocabulary {
            self.vocabulary.insert(word);
        }
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &CorrectionDictionary {
        &self.dictionary
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Apply the configured policy to a store failure.
    fn store_failure(&self, err: WordStoreError) -> Result<(), CorrectionError> {
        match self.config.vocabulary_policy {
            VocabularyPolicy::FailClosed => Err(CorrectionError::WordStoreUnavailable(err)),
            VocabularyPolicy::FailOpen => {
                warn!(error = %err, "word store unavailable, continuing without similarity suggestions");
                Ok(())
            }
        }
    }

    fn snapshot(&self) -> Result<VocabularySnapshot<'_>, CorrectionError> {
        let Some(store) = &self.store else {
            return Ok(VocabularySnapshot::new(&self.vocabulary, HashSet::new()));
        };
        match store.all_canonical_words() {
            Ok(custom) => Ok(VocabularySnapshot::new(&self.vocabulary, custom)),
            Err(err) => {
                self.store_failure(err)?;
                Ok(VocabularySnapshot::degraded(&self.vocabulary))
            }
        }
    }

    fn resolve<'a>(&'a self, token: &Token, vocabulary: &mut LazySnapshot<'a>) -> Result<Outcome, ResolveError> {
        let key = token.canonical();
        let len = key.chars().count();
        if len > self.config.max_token_chars {
            return Err(TokenError::TooLong {
                len,
                max: self.config.max_token_chars,
            }
            .into());
        }

        if let Some((corrected, confidence)) = self.dictionary.lookup(&key) {
            return Ok(Outcome::Replace {
                text: corrected.to_string(),
                resolution: Resolution {
                    kind: CorrectionKind::DictionaryMatch,
                    confidence,
                },
                suggestions: Vec::new(),
            });
        }

        if self.config.protect_known_words && vocabulary.get()?.is_known(&key) {
            return Ok(Outcome::Keep);
        }

        let rewrite = self.rules.try_apply(&key)?;
        if rewrite.changed() {
            debug!(token = %token.text, rules = ?rewrite.applied, "pattern rules applied");
            return Ok(Outcome::Replace {
                text: rewrite.text,
                resolution: Resolution {
                    kind: CorrectionKind::PatternMatch,
                    confidence: self.config.pattern_confidence,
                },
                suggestions: Vec::new(),
            });
        }

        let vocabulary = vocabulary.get()?;
        if vocabulary.is_known(&key) || !vocabulary.suggestions_enabled() {
            return Ok(Outcome::Keep);
        }

        let suggestions = self.matcher.suggest(&key, vocabulary);
        if let Some(top) = self.matcher.auto_correction(&suggestions) {
            return Ok(Outcome::Replace {
                text: top.word.clone(),
                resolution: Resolution {
                    kind: CorrectionKind::SimilarityMatch,
                    confidence: top.confidence,
                },
                suggestions,
            });
        }
        if suggestions.is_empty() {
            Ok(Outcome::Keep)
        } else {
            Ok(Outcome::Flag { suggestions })
        }
    }

    /// Correct a text. Fails only when the word store is required and unreachable.
    pub fn correct_text(&self, text: &str) -> Result<CorrectionResult, CorrectionError> {
        let original = normalize(text);
        if original.is_empty() {
            return Ok(CorrectionResult::identity(text));
        }

        let mut vocabulary = LazySnapshot::new(self);
        let mut corrected: Vec<CorrectedToken> = Vec::with_capacity(original.len());
        let mut flags = Vec::new();
        let mut attached: HashMap<usize, Vec<Suggestion>> = HashMap::new();

        for token in &original {
            if !token.is_target_script {
                corrected.push(CorrectedToken::kept(token));
                continue;
            }

            match self.resolve(token, &mut vocabulary) {
                Ok(Outcome::Keep) => corrected.push(CorrectedToken::kept(token)),
                Ok(Outcome::Replace {
                    text,
                    resolution,
                    suggestions,
                }) => {
                    debug!(
                        position = token.position,
                        original = %token.text,
                        corrected = %text,
                        kind = resolution.kind.as_str(),
                        confidence = resolution.confidence,
                        "token corrected"
                    );
                    let words = normalize(&text);
                    if words.is_empty() {
                        corrected.push(CorrectedToken::kept(token));
                        continue;
                    }
                    for (k, word) in words.into_iter().enumerate() {
                        corrected.push(CorrectedToken {
                            text: word.text,
                            spaced: if k == 0 { token.spaced } else { word.spaced },
                            source: Some(token.position),
                            resolution: Some(resolution),
                        });
                    }
                    if !suggestions.is_empty() {
                        attached.insert(token.position, suggestions);
                    }
                }
                Ok(Outcome::Flag { suggestions }) => {
                    debug!(
                        position = token.position,
                        token = %token.text,
                        suggestions = suggestions.len(),
                        "token flagged"
                    );
                    flags.push(CorrectionEntry {
                        original: token.text.clone(),
                        corrected: token.text.clone(),
                        position: token.position,
                        target: corrected.len(),
                        kind: CorrectionKind::Unknown,
                        confidence: suggestions.first().map_or(0.0, |s| s.confidence),
                        suggestions,
                    });
                    corrected.push(CorrectedToken::kept(token));
                }
                Err(ResolveError::Token(err)) => {
                    warn!(position = token.position, token = %token.text, error = %err, "token passed through unchanged");
                    corrected.push(CorrectedToken::kept(token));
                }
                Err(ResolveError::Fatal(err)) => return Err(err),
            }
        }

        let mut corrections = align(&original, &corrected);
        for entry in corrections.iter_mut() {
            if entry.kind == CorrectionKind::SimilarityMatch {
                if let Some(suggestions) = attached.remove(&entry.position) {
                    entry.suggestions = suggestions;
                }
            }
        }
        corrections.extend(flags);
        corrections.sort_by_key(|entry| (entry.position, entry.target));

        let statistics = aggregate(&original, &corrections);
        let highlighted = highlight(&original, &corrected, &corrections);
        let corrected_text = render(corrected.iter().map(|t| (t.text.as_str(), t.spaced)));

        debug!(
            tokens = original.len(),
            corrections = corrections.len(),
            errors = statistics.errors_found,
            "text corrected"
        );

        Ok(CorrectionResult {
            original_text: text.to_string(),
            corrected_text,
            corrections,
            statistics,
            highlighted,
        })
    }

    /// Whether a word is in the vocabulary, tolerating clitic prefixes.
    pub fn is_known(&self, word: &str) -> Result<bool, CorrectionError> {
        let key = canonical(word.trim());
        Ok(self.snapshot()?.is_known(&key))
    }

    /// Vocabulary status, dictionary correction and nearest known words for one word.
    pub fn suggest_word(&self, word: &str) -> Result<WordAdvice, CorrectionError> {
        let word = word.trim();
        let key = canonical(word);
        let vocabulary = self.snapshot()?;

        let stored = match &self.store {
            Some(store) => match store.lookup(&key) {
                Ok(entry) => entry,
                Err(err) => {
                    self.store_failure(err)?;
                    None
                }
            },
            None => None,
        };

        let suggestions = if vocabulary.suggestions_enabled() {
            self.matcher.suggest(&key, &vocabulary)
        } else {
            Vec::new()
        };

        Ok(WordAdvice {
            word: word.to_string(),
            known: vocabulary.is_known(&key),
            entry: stored.or_else(|| self.vocabulary.entry(&key)),
            correction: self.dictionary.lookup(&key).map(|(c, _)| c.to_string()),
            suggestions,
            canonical: key,
        })
    }
}

use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::BufRead;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use tadqeeq_core::{VocabularyEntry, VocabularySource, WordStore, WordStoreError};
use tadqeeq_text::{canonical, fold};

use crate::record::{
    validate_word, CustomCorrection, FrequentWord, NewWord, Page, Pagination, StoreStatistics,
    WordRecord, WordUpdate,
};
use crate::StoreError;

/// Largest page served by [`MemoryWordStore::list`].
pub const MAX_PER_PAGE: usize = 100;

const RECENT_DAYS: i64 = 7;
const MOST_FREQUENT: usize = 10;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, WordRecord>,
    by_canonical: HashMap<String, u64>,
    next_correction_id: u64,
    corrections: BTreeMap<String, CustomCorrection>,
}

/// Custom vocabulary kept in memory behind a single read-write lock.
#[derive(Debug, Default)]
pub struct MemoryWordStore {
    inner: RwLock<Inner>,
}

fn by_frequency(a: &WordRecord, b: &WordRecord) -> std::cmp::Ordering {
    b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word))
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load newline-separated words. Blank lines, `#` comments, duplicates
    /// and lines without Arabic letters are skipped.
    pub fn from_word_list(reader: impl BufRead) -> Result<Self, StoreError> {
        let store = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            match store.add_word(NewWord::new(word)) {
                Ok(_) => {}
                Err(StoreError::Duplicate(word)) => debug!(%word, "duplicate word skipped"),
                Err(StoreError::Invalid(reason)) => warn!(%reason, "word list entry skipped"),
                Err(err) => return Err(err),
            }
        }
        info!(words = store.len()?, "word list loaded");
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn add_word(&self, new: NewWord) -> Result<WordRecord, StoreError> {
        new.validate()?;
        let word = new.word.trim().to_string();
        let key = canonical(&word);

        let mut guard = self.write()?;
        let inner = &mut *guard;
        if inner.by_canonical.contains_key(&key) {
            return Err(StoreError::Duplicate(word));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();
        let record = WordRecord {
            id,
            word,
            canonical: key.clone(),
            word_type: new.word_type,
            frequency: new.frequency,
            root: new.root,
            synonyms: new.synonyms,
            definition: new.definition,
            created_at: now,
            updated_at: now,
        };
        inner.by_canonical.insert(key, id);
        inner.records.insert(id, record.clone());
        info!(id, word = %record.word, "word added");
        Ok(record)
    }

    /// Look a word up by its canonical form, so diacritized input matches.
    pub fn get_word(&self, word: &str) -> Result<Option<WordRecord>, StoreError> {
        let key = canonical(word.trim());
        let inner = self.read()?;
        Ok(inner
            .by_canonical
            .get(&key)
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    pub fn get_by_id(&self, id: u64) -> Result<Option<WordRecord>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    pub fn update_word(&self, id: u64, update: WordUpdate) -> Result<WordRecord, StoreError> {
        let mut guard = self.write()?;
        let inner = &mut *guard;
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(word) = update.word {
            validate_word(&word)?;
            let word = word.trim().to_string();
            let key = canonical(&word);
            if key != record.canonical {
                if inner.by_canonical.contains_key(&key) {
                    return Err(StoreError::Duplicate(word));
                }
                inner.by_canonical.remove(&record.canonical);
                inner.by_canonical.insert(key.clone(), id);
                record.canonical = key;
            }
            record.word = word;
        }
        if let Some(word_type) = update.word_type {
            record.word_type = word_type;
        }
        if let Some(frequency) = update.frequency {
            record.frequency = frequency;
        }
        if let Some(root) = update.root {
            record.root = Some(root);
        }
        if let Some(synonyms) = update.synonyms {
            record.synonyms = synonyms;
        }
        if let Some(definition) = update.definition {
            record.definition = Some(definition);
        }
        record.updated_at = Utc::now();

        info!(id, word = %record.word, "word updated");
        Ok(record.clone())
    }

    pub fn delete_word(&self, id: u64) -> Result<WordRecord, StoreError> {
        let mut inner = self.write()?;
        let record = inner.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        inner.by_canonical.remove(&record.canonical);
        info!(id, word = %record.word, "word deleted");
        Ok(record)
    }

    /// Loose substring search over words, synonyms and definitions, most frequent first.
    pub fn search(&self, term: &str, limit: usize) -> Result<Vec<WordRecord>, StoreError> {
        let needle = fold(term.trim());
        let matches = |text: &str| fold(text).contains(&needle);

        let inner = self.read()?;
        let mut found: Vec<WordRecord> = inner
            .records
            .values()
            .filter(|record| {
                matches(&record.word)
                    || record.synonyms.iter().any(|s| matches(s))
                    || record.definition.as_deref().is_some_and(|d| matches(d))
            })
            .cloned()
            .collect();
        found.sort_by(by_frequency);
        found.truncate(limit);
        Ok(found)
    }

    /// One page of words, most frequent first. Pages are 1-based.
    pub fn list(&self, page: usize, per_page: usize) -> Result<Page, StoreError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        let inner = self.read()?;
        let mut words: Vec<WordRecord> = inner.records.values().cloned().collect();
        drop(inner);
        words.sort_by(by_frequency);

        let total = words.len();
        let words = words
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Ok(Page {
            words,
            pagination: Pagination {
                page,
                per_page,
                total,
                total_pages: total.div_ceil(per_page),
            },
        })
    }

    pub fn statistics(&self) -> Result<StoreStatistics, StoreError> {
        let since = Utc::now() - Duration::days(RECENT_DAYS);
        let inner = self.read()?;

        let mut records: Vec<&WordRecord> = inner.records.values().collect();
        records.sort_by(|a, b| by_frequency(a, b));

        Ok(StoreStatistics {
            total_words: records.len(),
            recent_words: records.iter().filter(|r| r.created_at >= since).count(),
            most_frequent: records
                .iter()
                .take(MOST_FREQUENT)
                .map(|r| FrequentWord {
                    word: r.word.clone(),
                    frequency: r.frequency,
                })
                .collect(),
            total_corrections: inner.corrections.len(),
        })
    }

    /// Bump the usage counter of a word. Returns the new frequency, or `None`
    /// when the word is not stored.
    pub fn record_usage(&self, word: &str) -> Result<Option<u64>, StoreError> {
        let key = canonical(word.trim());
        let mut guard = self.write()?;
        let inner = &mut *guard;
        let Some(record) = inner
            .by_canonical
            .get(&key)
            .and_then(|id| inner.records.get_mut(id))
        else {
            return Ok(None);
        };
        record.frequency = record.frequency.saturating_add(1);
        record.updated_at = Utc::now();
        debug!(word = %record.word, frequency = record.frequency, "usage recorded");
        Ok(Some(record.frequency))
    }

    /// Add or replace a custom correction for a misspelling.
    pub fn add_correction(
        &self,
        original: &str,
        corrected: &str,
        confidence: f64,
    ) -> Result<CustomCorrection, StoreError> {
        let key = canonical(original.trim());
        let corrected = corrected.trim();
        if key.is_empty() || corrected.is_empty() {
            return Err(StoreError::Invalid(
                "both the misspelling and its correction are required".into(),
            ));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(StoreError::Invalid(format!(
                "confidence {confidence} is outside [0, 1]"
            )));
        }

        let mut inner = self.write()?;
        inner.next_correction_id += 1;
        let correction = CustomCorrection {
            id: inner.next_correction_id,
            original: key.clone(),
            corrected: corrected.to_string(),
            confidence,
            created_at: Utc::now(),
        };
        inner.corrections.insert(key, correction.clone());
        info!(original = %correction.original, corrected = %correction.corrected, "correction added");
        Ok(correction)
    }

    pub fn get_correction(&self, original: &str) -> Result<Option<CustomCorrection>, StoreError> {
        let key = canonical(original.trim());
        Ok(self.read()?.corrections.get(&key).cloned())
    }

    /// Every custom correction, ordered by misspelling.
    pub fn corrections(&self) -> Result<Vec<CustomCorrection>, StoreError> {
        Ok(self.read()?.corrections.values().cloned().collect())
    }
}

impl From<StoreError> for WordStoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Poisoned => WordStoreError::Poisoned,
            other => WordStoreError::Unavailable(other.to_string()),
        }
    }
}

impl WordStore for MemoryWordStore {
    fn lookup(&self, canonical_word: &str) -> Result<Option<VocabularyEntry>, WordStoreError> {
        let inner = self.read()?;
        Ok(inner
            .by_canonical
            .get(canonical_word)
            .and_then(|id| inner.records.get(id))
            .map(|record| VocabularyEntry {
                canonical_word: record.canonical.clone(),
                frequency: record.frequency,
                source: VocabularySource::Custom,
            }))
    }

    fn all_canonical_words(&self) -> Result<HashSet<String>, WordStoreError> {
        Ok(self.read()?.by_canonical.keys().cloned().collect())
    }

    fn increment_frequency(&self, canonical_word: &str) -> Result<bool, WordStoreError> {
        Ok(self.record_usage(canonical_word)?.is_some())
    }
}

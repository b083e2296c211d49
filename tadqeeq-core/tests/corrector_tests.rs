//! Integration tests for tadqeeq-core
//!
//! Tests cover:
//! - End-to-end correction of dictionary, rule and similarity cases
//! - Word store consultation and the fail-open / fail-closed policies
//! - Alignment and statistics of real correction results
//! - Concurrent use of a shared corrector

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tadqeeq_core::{
    apply_corrections, CorrectionError, CorrectionKind, Corrector, CorrectorConfig, Vocabulary,
    VocabularyEntry, VocabularySource, WordStore, WordStoreError, DEFAULT_CORRECTIONS,
};
use tadqeeq_text::normalize;

struct StaticStore {
    words: HashSet<String>,
    snapshots: AtomicUsize,
}

impl StaticStore {
    fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            snapshots: AtomicUsize::new(0),
        }
    }
}

impl WordStore for StaticStore {
    fn lookup(&self, canonical_word: &str) -> Result<Option<VocabularyEntry>, WordStoreError> {
        Ok(self.words.contains(canonical_word).then(|| VocabularyEntry {
            canonical_word: canonical_word.to_string(),
            frequency: 1,
            source: VocabularySource::Custom,
        }))
    }

    fn all_canonical_words(&self) -> Result<HashSet<String>, WordStoreError> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        Ok(self.words.clone())
    }

    fn increment_frequency(&self, canonical_word: &str) -> Result<bool, WordStoreError> {
        Ok(self.words.contains(canonical_word))
    }
}

struct FailingStore;

impl WordStore for FailingStore {
    fn lookup(&self, _: &str) -> Result<Option<VocabularyEntry>, WordStoreError> {
        Err(WordStoreError::Unavailable("connection refused".into()))
    }

    fn all_canonical_words(&self) -> Result<HashSet<String>, WordStoreError> {
        Err(WordStoreError::Unavailable("connection refused".into()))
    }

    fn increment_frequency(&self, _: &str) -> Result<bool, WordStoreError> {
        Err(WordStoreError::Unavailable("connection refused".into()))
    }
}

fn hospital_corrector() -> Corrector {
    Corrector::default()
        .with_vocabulary(Vocabulary::new())
        .with_store(Arc::new(StaticStore::new(&["مستشفى"])))
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_dictionary_hit_in_sentence() {
    let result = Corrector::default().correct_text("هاذا الكتاب").unwrap();

    assert_eq!(result.corrected_text, "هذا الكتاب");
    assert_eq!(result.corrections.len(), 1);
    let entry = &result.corrections[0];
    assert_eq!(entry.kind, CorrectionKind::DictionaryMatch);
    assert_eq!(entry.position, 0);
    assert_eq!(entry.original, "هاذا");
    assert_eq!(entry.corrected, "هذا");
    assert_eq!(entry.confidence, 0.95);

    assert_eq!(result.statistics.total_words, 2);
    assert_eq!(result.statistics.errors_found, 1);
    assert_eq!(result.statistics.corrections_made, 1);
    assert_eq!(result.statistics.accuracy, 50.0);
}

#[test]
fn test_empty_input() {
    let result = Corrector::default().correct_text("").unwrap();
    assert_eq!(result.original_text, "");
    assert_eq!(result.corrected_text, "");
    assert!(result.corrections.is_empty());
    assert_eq!(result.statistics.total_words, 0);
    assert_eq!(result.statistics.errors_found, 0);
    assert_eq!(result.statistics.corrections_made, 0);
    assert_eq!(result.statistics.accuracy, 100.0);
}

#[test]
fn test_close_word_is_auto_corrected() {
    let result = hospital_corrector().correct_text("مستشفا").unwrap();

    assert_eq!(result.corrected_text, "مستشفى");
    assert_eq!(result.corrections.len(), 1);
    let entry = &result.corrections[0];
    assert_eq!(entry.kind, CorrectionKind::SimilarityMatch);
    assert!((entry.confidence - 10.0 / 12.0).abs() < 1e-9);
    assert_eq!(entry.suggestions[0].word, "مستشفى");
    assert_eq!(result.statistics.corrections_made, 1);
}

#[test]
fn test_distant_word_is_only_flagged() {
    let result = hospital_corrector().correct_text("مستقفا").unwrap();

    assert_eq!(result.corrected_text, "مستقفا");
    assert_eq!(result.corrections.len(), 1);
    let entry = &result.corrections[0];
    assert_eq!(entry.kind, CorrectionKind::Unknown);
    assert_eq!(entry.original, entry.corrected);
    assert!(!entry.suggestions.is_empty() && entry.suggestions.len() <= 3);
    assert!(entry.suggestions.iter().all(|s| s.confidence >= 0.6 && s.confidence < 0.8));
    assert_eq!(result.statistics.corrections_made, 0);
    assert_eq!(result.statistics.errors_found, 1);
}

#[test]
fn test_threshold_boundaries_are_inclusive() {
    let config = CorrectorConfig {
        extra_vocabulary: vec!["سلامة".into(), "سلمزر".into()],
        ..Default::default()
    };
    let corrector = Corrector::new(config)
        .unwrap()
        .with_vocabulary(Vocabulary::new());

    let applied = corrector.correct_text("سلامك").unwrap();
    assert_eq!(applied.corrected_text, "سلامة");
    assert_eq!(applied.corrections[0].kind, CorrectionKind::SimilarityMatch);
    assert_eq!(applied.corrections[0].confidence, 0.8);

    let flagged = corrector.correct_text("سلمكت").unwrap();
    assert_eq!(flagged.corrected_text, "سلمكت");
    assert_eq!(flagged.corrections[0].kind, CorrectionKind::Unknown);
    assert_eq!(flagged.corrections[0].suggestions[0].word, "سلمزر");
    assert_eq!(flagged.corrections[0].suggestions[0].confidence, 0.6);
}

#[test]
fn test_every_dictionary_entry_is_applied_with_fixed_confidence() {
    let corrector = Corrector::default();
    for (misspelling, correction) in DEFAULT_CORRECTIONS {
        let result = corrector.correct_text(misspelling).unwrap();
        assert_eq!(result.corrected_text, *correction, "for {misspelling}");
        let entry = &result.corrections[0];
        assert_eq!(entry.kind, CorrectionKind::DictionaryMatch);
        assert_eq!(entry.confidence, 0.95);
        assert_eq!(entry.position, 0);
    }
}

#[test]
fn test_punctuation_and_latin_pass_through() {
    let result = Corrector::default().correct_text("هاذا، OK!").unwrap();
    assert_eq!(result.corrected_text, "هذا، OK!");
    assert_eq!(result.statistics.total_words, 1);
}

// ============================================================================
// Word store policies
// ============================================================================

#[test]
fn test_store_snapshot_is_taken_once_per_request() {
    let store = Arc::new(StaticStore::new(&["مستشفى"]));
    let corrector = Corrector::default()
        .with_vocabulary(Vocabulary::new())
        .with_store(store.clone());

    corrector.correct_text("مستشفا مستقفا مستشفى").unwrap();
    assert_eq!(store.snapshots.load(Ordering::SeqCst), 1);
}

#[test]
fn test_fail_open_keeps_dictionary_and_rules() {
    let corrector = Corrector::default().with_store(Arc::new(FailingStore));
    let result = corrector.correct_text("هاذا مدرسه مستشفا").unwrap();

    assert_eq!(result.corrected_text, "هذا مدرسة مستشفا");
    assert!(result
        .corrections
        .iter()
        .all(|c| c.kind != CorrectionKind::SimilarityMatch && c.kind != CorrectionKind::Unknown));
}

#[test]
fn test_fail_closed_reports_store_failure() {
    let corrector = Corrector::new(CorrectorConfig::default().fail_closed())
        .unwrap()
        .with_store(Arc::new(FailingStore));

    let err = corrector.correct_text("هاذا مستشفا").unwrap_err();
    assert!(matches!(err, CorrectionError::WordStoreUnavailable(_)));
    assert!(corrector.suggest_word("مستشفا").is_err());
}

#[test]
fn test_fail_closed_without_vocabulary_need_succeeds() {
    let corrector = Corrector::new(CorrectorConfig::default().fail_closed())
        .unwrap()
        .with_store(Arc::new(FailingStore));

    let result = corrector.correct_text("هاذا").unwrap();
    assert_eq!(result.corrected_text, "هذا");
}

#[test]
fn test_suggest_word_reads_store_entry() {
    let advice = hospital_corrector().suggest_word("مستشفى").unwrap();
    assert!(advice.known);
    assert_eq!(
        advice.entry.map(|e| e.source),
        Some(VocabularySource::Custom)
    );
    assert!(advice.suggestions.is_empty());
}

// ============================================================================
// Alignment of correction results
// ============================================================================

#[test]
fn test_corrections_rebuild_corrected_tokens() {
    let text = "بعدين نعم هاذا، ألمدرسه";
    let result = Corrector::default().correct_text(text).unwrap();
    let original = normalize(text);
    let rebuilt = apply_corrections(&original, &result.corrections);
    let expected: Vec<String> = normalize(&result.corrected_text)
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(rebuilt, expected);
    assert_eq!(result.corrected_text, "بعد ذلك نعم هذا، المدرسة");
}

#[test]
fn test_expansion_beside_correction_keeps_each_word_fix() {
    let result = Corrector::default().correct_text("بعدين هاذا").unwrap();
    assert_eq!(result.corrected_text, "بعد ذلك هذا");

    let summary: Vec<(usize, &str, &str, CorrectionKind)> = result
        .corrections
        .iter()
        .map(|c| (c.position, c.original.as_str(), c.corrected.as_str(), c.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, "بعدين", "بعد", CorrectionKind::DictionaryMatch),
            (1, "هاذا", "هذا", CorrectionKind::DictionaryMatch),
            (2, "", "ذلك", CorrectionKind::Insertion),
        ]
    );
    assert_eq!(result.statistics.errors_found, 2);
    assert!(result
        .highlighted
        .corrected
        .contains("<mark class=\"correction\">هذا</mark>"));
    assert!(result
        .highlighted
        .corrected
        .contains("<mark class=\"added\">ذلك</mark>"));
}

#[test]
fn test_corrections_are_ordered_by_position() {
    let result = Corrector::default()
        .correct_text("مدرسه جميل هاذا بعدين")
        .unwrap();
    let positions: Vec<usize> = result.corrections.iter().map(|c| c.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn test_highlighting_marks_changes() {
    let result = Corrector::default().correct_text("هاذا الكتاب").unwrap();
    assert_eq!(
        result.highlighted.original,
        "<mark class=\"error\">هاذا</mark> الكتاب"
    );
    assert_eq!(
        result.highlighted.corrected,
        "<mark class=\"correction\">هذا</mark> الكتاب"
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_corrector_across_threads() {
    let corrector = Arc::new(hospital_corrector());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let corrector = Arc::clone(&corrector);
            scope.spawn(move || {
                let result = corrector.correct_text("مستشفا").unwrap();
                assert_eq!(result.corrected_text, "مستشفى");
            });
        }
    });
}

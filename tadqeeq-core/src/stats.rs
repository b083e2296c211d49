//! Statistics Aggregator

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use tadqeeq_text::{contains_arabic_letter, Token};

use crate::align::{CorrectionEntry, CorrectionKind};

/// Per-request word, error and accuracy counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_words: usize,
    pub errors_found: usize,
    pub corrections_made: usize,
    /// Percentage in [0, 100].
    pub accuracy: f64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            total_words: 0,
            errors_found: 0,
            corrections_made: 0,
            accuracy: 100.0,
        }
    }
}

/// Accuracy as a percentage, 100 for an empty text.
pub fn accuracy(total_words: usize, errors_found: usize) -> f64 {
    if total_words == 0 {
        return 100.0;
    }
    let correct = total_words.saturating_sub(errors_found) as f64;
    (correct / total_words as f64 * 100.0).clamp(0.0, 100.0)
}

fn is_substitution(entry: &CorrectionEntry) -> bool {
    !matches!(entry.kind, CorrectionKind::Insertion | CorrectionKind::Deletion)
        && entry.original != entry.corrected
}

pub fn aggregate(original: &[Token], corrections: &[CorrectionEntry]) -> Statistics {
    let total_words = original.iter().filter(|t| t.is_target_script).count();
    let is_target = |position: usize| original.get(position).is_some_and(|t| t.is_target_script);

    let mut errors_found = 0;
    let mut corrections_made = 0;
    let mut substitution_targets = HashSet::new();
    let mut insertions: Vec<&CorrectionEntry> = Vec::new();

    for entry in corrections {
        if entry.kind.is_applied() {
            corrections_made += 1;
        }
        match entry.kind {
            CorrectionKind::Insertion => insertions.push(entry),
            CorrectionKind::Deletion => {
                if is_target(entry.position) {
                    errors_found += 1;
                }
            }
            CorrectionKind::Unknown if !is_substitution(entry) => errors_found += 1,
            _ => {
                substitution_targets.insert(entry.target);
                if is_target(entry.position) {
                    errors_found += 1;
                }
            }
        }
    }

    // One error per run of inserted words that is not the tail of an expanded substitution.
    insertions.sort_by_key(|entry| entry.target);
    let mut block_start = 0;
    while block_start < insertions.len() {
        let mut block_end = block_start + 1;
        while block_end < insertions.len()
            && insertions[block_end].target == insertions[block_end - 1].target + 1
        {
            block_end += 1;
        }
        let block = &insertions[block_start..block_end];
        let first = block[0].target;
        let expansion = first > 0 && substitution_targets.contains(&(first - 1));
        if !expansion && block.iter().any(|entry| contains_arabic_letter(&entry.corrected)) {
            errors_found += 1;
        }
        block_start = block_end;
    }

    Statistics {
        total_words,
        errors_found,
        corrections_made,
        accuracy: accuracy(total_words, errors_found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align_texts;
    use tadqeeq_text::normalize;

    fn entry(kind: CorrectionKind, original: &str, corrected: &str, position: usize, target: usize) -> CorrectionEntry {
        CorrectionEntry {
            original: original.to_string(),
            corrected: corrected.to_string(),
            position,
            target,
            kind,
            confidence: 0.95,
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_empty_text_is_fully_accurate() {
        assert_eq!(aggregate(&[], &[]), Statistics::default());
        assert_eq!(accuracy(0, 3), 100.0);
    }

    #[test]
    fn test_accuracy_is_clamped() {
        assert_eq!(accuracy(2, 5), 0.0);
        assert_eq!(accuracy(4, 1), 75.0);
    }

    #[test]
    fn test_punctuation_is_not_counted_as_words() {
        let tokens = normalize("هذا، صحيح.");
        let stats = aggregate(&tokens, &[]);
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.accuracy, 100.0);
    }

    #[test]
    fn test_dictionary_substitution_counts_once() {
        let tokens = normalize("هاذا الكتاب");
        let corrections = vec![entry(CorrectionKind::DictionaryMatch, "هاذا", "هذا", 0, 0)];
        let stats = aggregate(&tokens, &corrections);
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.errors_found, 1);
        assert_eq!(stats.corrections_made, 1);
        assert_eq!(stats.accuracy, 50.0);
    }

    #[test]
    fn test_unknown_flags_are_errors_but_not_corrections() {
        let tokens = normalize("مستقفا كبير");
        let corrections = vec![entry(CorrectionKind::Unknown, "مستقفا", "مستقفا", 0, 0)];
        let stats = aggregate(&tokens, &corrections);
        assert_eq!(stats.errors_found, 1);
        assert_eq!(stats.corrections_made, 0);
    }

    #[test]
    fn test_expansion_of_a_substitution_is_not_an_extra_error() {
        let tokens = normalize("بعدين نذهب");
        let corrections = vec![
            entry(CorrectionKind::DictionaryMatch, "بعدين", "بعد", 0, 0),
            entry(CorrectionKind::Insertion, "", "ذلك", 2, 1),
        ];
        let stats = aggregate(&tokens, &corrections);
        assert_eq!(stats.errors_found, 1);
        assert_eq!(stats.corrections_made, 1);
    }

    #[test]
    fn test_each_inserted_block_is_one_error() {
        let tokens = normalize("أ ج");
        let corrections = align_texts("أ ج", "أ ب د ج ه");
        let stats = aggregate(&tokens, &corrections);
        // "ب د" is one block, "ه" another
        assert_eq!(stats.errors_found, 2);
        assert_eq!(stats.accuracy, 0.0);
    }

    #[test]
    fn test_deletions_of_words_are_errors() {
        let tokens = normalize("أ ب ج");
        let corrections = align_texts("أ ب ج", "أ ج");
        let stats = aggregate(&tokens, &corrections);
        assert_eq!(stats.errors_found, 1);
        assert_eq!(stats.corrections_made, 0);
        assert!((stats.accuracy - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_deleted_punctuation_is_not_an_error() {
        let tokens = normalize("أ . ب");
        let corrections = align_texts("أ . ب", "أ ب");
        assert_eq!(aggregate(&tokens, &corrections).errors_found, 0);
    }
}

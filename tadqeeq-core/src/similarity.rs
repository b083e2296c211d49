//! Similarity Matcher
//!
//! Ranks known-correct words against an unknown token using the
//! Ratcliff/Obershelp matching-block ratio (`2·M / T`). Two cheap upper
//! bounds prune the scan before the full ratio is computed:
//! - length bound: `2·min(a, b) / (a + b)`
//! - character multiset bound: shared characters regardless of order
//!
//! Both bounds are never lower than the real ratio, so pruning does not
//! change results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::config::CorrectorConfig;
use crate::vocabulary::VocabularySnapshot;

/// A ranked replacement candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub word: String,
    /// Similarity ratio in [0, 1].
    pub confidence: f64,
    /// Levenshtein distance to the token, used to break ties.
    pub distance: usize,
}

/// Similarity ratio between two strings, compared char by char.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

/// Upper bound on [`ratio`] from lengths alone.
pub fn real_quick_ratio(a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    2.0 * a_len.min(b_len) as f64 / total as f64
}

/// Upper bound on [`ratio`] from shared characters, ignoring order.
fn quick_ratio(a_counts: &HashMap<char, usize>, a_len: usize, b: &[char]) -> f64 {
    let total = a_len + b.len();
    if total == 0 {
        return 1.0;
    }
    let mut available = a_counts.clone();
    let mut shared = 0;
    for ch in b {
        if let Some(count) = available.get_mut(ch) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }
    2.0 * shared as f64 / total as f64
}

/// Candidate lengths that can reach `threshold` against a token of `len` chars.
///
/// Loose at the edges; exact filtering happens on the ratio. Thresholds above
/// 1 are treated as 1, so the range is never empty.
pub fn length_bounds(len: usize, threshold: f64) -> RangeInclusive<usize> {
    if !(threshold > 0.0) {
        return 0..=usize::MAX;
    }
    let threshold = threshold.min(1.0);
    let len = len as f64;
    let min = (threshold * len / (2.0 - threshold)).floor() as usize;
    let max = (len * (2.0 - threshold) / threshold).ceil() as usize;
    min..=max
}

/// Total size of the matching blocks found by recursive longest-match splitting.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = find_longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long blocks the one starting earliest in `a` wins, then
/// the one starting earliest in `b`.
fn find_longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run[j + 1] = length of the common run ending at a[i - 1], b[j]
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            current[j + 1] = if a[i] == b[j] { previous[j] + 1 } else { 0 };
            let k = current[j + 1];
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_k)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    pub auto_correct_threshold: f64,
    pub suggestion_threshold: f64,
    pub max_suggestions: usize,
    pub parallel_scan_threshold: usize,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::from_config(&CorrectorConfig::default())
    }
}

impl SimilarityMatcher {
    pub fn from_config(config: &CorrectorConfig) -> Self {
        Self {
            auto_correct_threshold: config.auto_correct_threshold,
            suggestion_threshold: config.suggestion_threshold,
            max_suggestions: config.max_suggestions,
            parallel_scan_threshold: config.parallel_scan_threshold,
        }
    }

    /// Rank vocabulary words against a canonical token.
    pub fn suggest(&self, token: &str, vocabulary: &VocabularySnapshot<'_>) -> Vec<Suggestion> {
        let len = token.chars().count();
        let candidates = vocabulary.candidates(length_bounds(len, self.suggestion_threshold));
        self.rank(token, candidates)
    }

    /// Rank an arbitrary candidate list against a canonical token.
    pub fn rank<'c, I>(&self, token: &str, candidates: I) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let token_chars: Vec<char> = token.chars().collect();
        let mut token_counts: HashMap<char, usize> = HashMap::new();
        for ch in &token_chars {
            *token_counts.entry(*ch).or_insert(0) += 1;
        }
        let threshold = self.suggestion_threshold;

        let score = |word: &str| -> Option<Suggestion> {
            if word == token {
                return None;
            }
            let word_chars: Vec<char> = word.chars().collect();
            if real_quick_ratio(token_chars.len(), word_chars.len()) < threshold
                || quick_ratio(&token_counts, token_chars.len(), &word_chars) < threshold
            {
                return None;
            }
            let confidence = ratio_chars(&token_chars, &word_chars);
            (confidence >= threshold).then(|| Suggestion {
                word: word.to_string(),
                confidence,
                distance: strsim::levenshtein(token, word),
            })
        };

        let candidates: Vec<&str> = candidates.into_iter().collect();
        let mut suggestions: Vec<Suggestion> = if candidates.len() >= self.parallel_scan_threshold {
            candidates.par_iter().filter_map(|&word| score(word)).collect()
        } else {
            candidates.iter().filter_map(|&word| score(word)).collect()
        };

        suggestions.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.distance.cmp(&b.distance))
                .then_with(|| a.word.cmp(&b.word))
        });
        suggestions.truncate(self.max_suggestions);
        suggestions
    }

    /// The top suggestion, if it is similar enough to be applied silently.
    pub fn auto_correction<'s>(&self, suggestions: &'s [Suggestion]) -> Option<&'s Suggestion> {
        suggestions
            .first()
            .filter(|top| top.confidence >= self.auto_correct_threshold)
    }
}

//! Diff Aligner
//!
//! Aligns the original token sequence with the corrected one using a
//! longest-common-subsequence edit script, so a single inserted or deleted
//! word does not turn every following token into a false substitution.
//!
//! Corrected tokens produced by the pipeline carry the index of their source
//! token, which makes alignment a linear walk. Tokens without provenance fall
//! back to a linear-space LCS.

use serde::{Deserialize, Serialize};

use tadqeeq_text::{normalize, Token};

use crate::similarity::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    DictionaryMatch,
    PatternMatch,
    SimilarityMatch,
    Insertion,
    Deletion,
    /// Flagged but not applied, or a substitution of unknown provenance.
    Unknown,
}

impl CorrectionKind {
    /// Whether the kind denotes a correction actually applied by the pipeline.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::DictionaryMatch | Self::PatternMatch | Self::SimilarityMatch
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DictionaryMatch => "dictionary_match",
            Self::PatternMatch => "pattern_match",
            Self::SimilarityMatch => "similarity_match",
            Self::Insertion => "insertion",
            Self::Deletion => "deletion",
            Self::Unknown => "unknown",
        }
    }
}

/// Which component produced a corrected token, and how sure it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub kind: CorrectionKind,
    pub confidence: f64,
}

/// A token of the corrected sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedToken {
    pub text: String,
    pub spaced: bool,
    /// Index of the original token this one was produced from.
    pub source: Option<usize>,
    /// Set when the token differs from its source.
    pub resolution: Option<Resolution>,
}

impl CorrectedToken {
    /// Token without provenance.
    pub fn plain(text: impl Into<String>, spaced: bool) -> Self {
        Self {
            text: text.into(),
            spaced,
            source: None,
            resolution: None,
        }
    }

    /// Unchanged copy of an original token.
    pub fn kept(token: &Token) -> Self {
        Self {
            text: token.text.clone(),
            spaced: token.spaced,
            source: Some(token.position),
            resolution: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    /// Original text; empty for insertions.
    pub original: String,
    /// Corrected text; empty for deletions.
    pub corrected: String,
    /// Index in the original sequence, or its length for insertions.
    pub position: usize,
    /// Index of the corrected token (for deletions: where it would have stood).
    pub target: usize,
    pub kind: CorrectionKind,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

fn pair_matches(original: &Token, corrected: &CorrectedToken) -> bool {
    original.text == corrected.text
        && corrected
            .source
            .map_or(true, |source| source == original.position)
}

/// Minimal edit script between `original` and `corrected`, ordered by position.
pub fn align(original: &[Token], corrected: &[CorrectedToken]) -> Vec<CorrectionEntry> {
    let mut entries = Vec::new();
    let mut deleted = Vec::new();
    let mut inserted = Vec::new();
    let (mut i, mut j) = (0, 0);

    for (mi, mj) in matched_pairs(original, corrected) {
        deleted.extend(i..mi);
        inserted.extend(j..mj);
        flush_gap(original, corrected, &mut deleted, &mut inserted, mj, &mut entries);
        i = mi + 1;
        j = mj + 1;
    }
    deleted.extend(i..original.len());
    inserted.extend(j..corrected.len());
    flush_gap(
        original,
        corrected,
        &mut deleted,
        &mut inserted,
        corrected.len(),
        &mut entries,
    );

    entries.sort_by_key(|entry| (entry.position, entry.target));
    entries
}

/// Index pairs `(original, corrected)` of a longest common subsequence, ascending.
fn matched_pairs(original: &[Token], corrected: &[CorrectedToken]) -> Vec<(usize, usize)> {
    let prefix = original
        .iter()
        .zip(corrected)
        .take_while(|(o, c)| pair_matches(o, c))
        .count();
    let suffix = original[prefix..]
        .iter()
        .rev()
        .zip(corrected[prefix..].iter().rev())
        .take_while(|(o, c)| pair_matches(o, c))
        .count();
    let (n, m) = (original.len() - suffix, corrected.len() - suffix);

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|k| (k, k)).collect();
    let middle = (&original[prefix..n], &corrected[prefix..m]);
    if !provenance_pairs(middle.0, middle.1, prefix, prefix, &mut pairs) {
        hirschberg(middle.0, middle.1, prefix, prefix, &mut pairs);
    }
    pairs.extend((0..suffix).map(|k| (n + k, m + k)));
    pairs
}

/// Linear walk when every corrected token names its source and sources never
/// go backwards. A corrected token can then only match the original it came from.
/// Returns false, leaving `pairs` untouched, when provenance is incomplete.
fn provenance_pairs(
    original: &[Token],
    corrected: &[CorrectedToken],
    i_off: usize,
    j_off: usize,
    pairs: &mut Vec<(usize, usize)>,
) -> bool {
    let mut last = None;
    for token in corrected {
        match token.source {
            Some(source) if last.map_or(true, |prev| prev <= source) => last = Some(source),
            _ => return false,
        }
    }

    let mut j = 0;
    for (i, token) in original.iter().enumerate() {
        while j < corrected.len() && corrected[j].source.is_some_and(|s| s < token.position) {
            j += 1;
        }
        let group_end = corrected[j..]
            .iter()
            .position(|c| c.source != Some(token.position))
            .map_or(corrected.len(), |len| j + len);
        if let Some(k) = (j..group_end).find(|&k| pair_matches(token, &corrected[k])) {
            pairs.push((i_off + i, j_off + k));
        }
        j = group_end;
    }
    true
}

/// Hirschberg's divide and conquer LCS: two rows of memory per level.
fn hirschberg(
    original: &[Token],
    corrected: &[CorrectedToken],
    i_off: usize,
    j_off: usize,
    pairs: &mut Vec<(usize, usize)>,
) {
    if original.is_empty() || corrected.is_empty() {
        return;
    }
    if original.len() == 1 {
        if let Some(j) = corrected.iter().position(|c| pair_matches(&original[0], c)) {
            pairs.push((i_off, j_off + j));
        }
        return;
    }

    let mid = original.len() / 2;
    let head = lcs_row(&original[..mid], corrected);
    let tail = lcs_row_rev(&original[mid..], corrected);
    let split = (0..=corrected.len())
        .max_by_key(|&j| (head[j] + tail[j], std::cmp::Reverse(j)))
        .unwrap_or(0);

    hirschberg(&original[..mid], &corrected[..split], i_off, j_off, pairs);
    hirschberg(
        &original[mid..],
        &corrected[split..],
        i_off + mid,
        j_off + split,
        pairs,
    );
}

/// row[j] = LCS length of `original` and `corrected[..j]`.
fn lcs_row(original: &[Token], corrected: &[CorrectedToken]) -> Vec<usize> {
    let m = corrected.len();
    let mut prev = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];
    for token in original {
        for j in 1..=m {
            cur[j] = if pair_matches(token, &corrected[j - 1]) {
                prev[j - 1] + 1
            } else {
                prev[j].max(cur[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

/// row[j] = LCS length of `original` and `corrected[j..]`.
fn lcs_row_rev(original: &[Token], corrected: &[CorrectedToken]) -> Vec<usize> {
    let m = corrected.len();
    let mut prev = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];
    for token in original.iter().rev() {
        for j in (0..m).rev() {
            cur[j] = if pair_matches(token, &corrected[j]) {
                prev[j + 1] + 1
            } else {
                prev[j].max(cur[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

/// Turn one gap between matched tokens into substitutions, then leftover
/// deletions and insertions. `next_target` is the corrected index after the gap.
///
/// A deleted original pairs with the first inserted token it produced. Tokens
/// without provenance pair with the remaining deletions in order.
fn flush_gap(
    original: &[Token],
    corrected: &[CorrectedToken],
    deleted: &mut Vec<usize>,
    inserted: &mut Vec<usize>,
    next_target: usize,
    entries: &mut Vec<CorrectionEntry>,
) {
    // partner[k] = original index paired with inserted[k]
    let mut partner: Vec<Option<usize>> = vec![None; inserted.len()];
    let mut unpaired = Vec::new();
    for &i in deleted.iter() {
        let own = inserted.iter().enumerate().position(|(k, &j)| {
            partner[k].is_none() && corrected[j].source == Some(original[i].position)
        });
        match own {
            Some(k) => partner[k] = Some(i),
            None => unpaired.push(i),
        }
    }
    let mut anonymous = inserted
        .iter()
        .enumerate()
        .filter(|&(_, &j)| corrected[j].source.is_none())
        .map(|(k, _)| k);
    let mut leftover = Vec::new();
    for i in unpaired {
        match anonymous.next() {
            Some(k) => partner[k] = Some(i),
            None => leftover.push(i),
        }
    }

    for (k, &j) in inserted.iter().enumerate() {
        let token = &corrected[j];
        let entry = match partner[k] {
            Some(i) => {
                let resolution = token.resolution.unwrap_or(Resolution {
                    kind: CorrectionKind::Unknown,
                    confidence: 0.0,
                });
                CorrectionEntry {
                    original: original[i].text.clone(),
                    corrected: token.text.clone(),
                    position: i,
                    target: j,
                    kind: resolution.kind,
                    confidence: resolution.confidence,
                    suggestions: Vec::new(),
                }
            }
            None => CorrectionEntry {
                original: String::new(),
                corrected: token.text.clone(),
                position: original.len(),
                target: j,
                kind: CorrectionKind::Insertion,
                confidence: token.resolution.map_or(1.0, |r| r.confidence),
                suggestions: Vec::new(),
            },
        };
        entries.push(entry);
    }

    for i in leftover {
        // first corrected token of the gap that stands for a later original
        let target = inserted
            .iter()
            .enumerate()
            .find(|&(k, &j)| match partner[k] {
                Some(p) => p > i,
                None => corrected[j]
                    .source
                    .is_some_and(|s| s > original[i].position),
            })
            .map_or(next_target, |(_, &j)| j);
        entries.push(CorrectionEntry {
            original: original[i].text.clone(),
            corrected: String::new(),
            position: i,
            target,
            kind: CorrectionKind::Deletion,
            confidence: 1.0,
            suggestions: Vec::new(),
        });
    }

    deleted.clear();
    inserted.clear();
}

/// Align two arbitrary texts, ignoring provenance.
pub fn align_texts(original: &str, corrected: &str) -> Vec<CorrectionEntry> {
    let original = normalize(original);
    let corrected: Vec<CorrectedToken> = normalize(corrected)
        .into_iter()
        .map(|token| CorrectedToken::plain(token.text, token.spaced))
        .collect();
    align(&original, &corrected)
}

/// Rebuild the corrected token texts from the original tokens and an edit script.
pub fn apply_corrections(original: &[Token], corrections: &[CorrectionEntry]) -> Vec<String> {
    let mut slots: Vec<Option<String>> = original.iter().map(|t| Some(t.text.clone())).collect();
    let mut insertions: Vec<&CorrectionEntry> = Vec::new();

    for entry in corrections {
        match entry.kind {
            CorrectionKind::Insertion => insertions.push(entry),
            CorrectionKind::Deletion => {
                if let Some(slot) = slots.get_mut(entry.position) {
                    *slot = None;
                }
            }
            _ => {
                if let Some(slot) = slots.get_mut(entry.position) {
                    *slot = Some(entry.corrected.clone());
                }
            }
        }
    }

    let mut out: Vec<String> = slots.into_iter().flatten().collect();
    insertions.sort_by_key(|entry| entry.target);
    for entry in insertions {
        let at = entry.target.min(out.len());
        out.insert(at, entry.corrected.clone());
    }
    out
}

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

use tadqeeq_core::{Corrector, SimilarityMatcher, Vocabulary, VocabularySnapshot};

const LETTERS: &[char] = &[
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ع',
    'غ', 'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي',
];

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.gen_range(3..9);
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())])
        .collect()
}

fn build_vocabulary(count: usize) -> Vocabulary {
    let mut rng = StdRng::seed_from_u64(42);
    Vocabulary::from_words((0..count).map(|_| random_word(&mut rng)))
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_scan");

    for size in [1_000, 10_000, 50_000] {
        let vocabulary = build_vocabulary(size);
        let snapshot = VocabularySnapshot::new(&vocabulary, HashSet::new());

        let sequential = SimilarityMatcher {
            parallel_scan_threshold: usize::MAX,
            ..Default::default()
        };
        group.bench_function(BenchmarkId::new("sequential", size), |b| {
            b.iter(|| sequential.suggest("مستشفا", &snapshot))
        });

        let parallel = SimilarityMatcher {
            parallel_scan_threshold: 1,
            ..Default::default()
        };
        group.bench_function(BenchmarkId::new("parallel", size), |b| {
            b.iter(|| parallel.suggest("مستشفا", &snapshot))
        });
    }

    group.finish();
}

fn bench_correct_text(c: &mut Criterion) {
    let corrector = Corrector::default();
    let text = "هاذا الكتاب مفيد جدا لكل طالب يريد ان يتعلم اللغه العربيه بطريقه صحيحه";

    c.bench_function("correct_text_sentence", |b| {
        b.iter(|| corrector.correct_text(text))
    });
}

criterion_group!(benches, bench_similarity, bench_correct_text);
criterion_main!(benches);

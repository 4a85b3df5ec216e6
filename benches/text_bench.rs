//! Benchmarks for the text frontend
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sdkwork_tts_text::text::cjk::tokenize_by_cjk_char;
use sdkwork_tts_text::text::merge_sentences;
use sdkwork_tts_text::{split_sentences, NormalizerConfig, TextNormalizer};

/// Benchmark text normalization
fn bench_text_normalization(c: &mut Criterion) {
    let normalizer = TextNormalizer::new();
    let texts = vec![
        "Hello world.",
        "\u{201C}我爱你\u{201D}的英语是\u{201C}I love you\u{201D}",
        "晕XUAN4是一种GAN3觉，受不liao3你了……",
        "约瑟夫·高登-莱维特（Joseph Gordon-Levitt）是美国演员。",
        "The quick brown fox jumps over the lazy dog. This is a longer sentence with more words to process.",
    ];

    let mut group = c.benchmark_group("text_normalization");
    for (i, text) in texts.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("normalize", i), text, |b, text| {
            b.iter(|| normalizer.normalize(black_box(text)))
        });
    }
    group.finish();

    let expanding = TextNormalizer::with_config(NormalizerConfig {
        expand_english: true,
    });
    c.bench_function("normalize_expand_english", |b| {
        b.iter(|| expanding.normalize(black_box("Dr. Smith has 42 patients and 1,234 files.")))
    });
}

/// Benchmark the CJK pre-pass
fn bench_cjk_prepass(c: &mut Criterion) {
    let text = "我爱你 I love you，".repeat(50);
    c.bench_function("tokenize_by_cjk_char", |b| {
        b.iter(|| tokenize_by_cjk_char(black_box(&text)))
    });
}

/// Benchmark sentence segmentation
fn bench_text_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_segmentation");

    for num_tokens in [100, 1000, 10000] {
        let tokens: Vec<String> = (0..num_tokens)
            .map(|i| match i % 17 {
                16 => ".".to_string(),
                8 => ",".to_string(),
                _ => format!("\u{2581}w{}", i % 97),
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::new("split_sentences", num_tokens),
            &tokens,
            |b, tokens| b.iter(|| split_sentences(black_box(tokens), 120)),
        );
    }

    // Worst case: no split point at all
    let unbroken: Vec<String> = (0..10000).map(|i| format!("w{}", i)).collect();
    group.bench_function("hard_cut_10000", |b| {
        b.iter(|| split_sentences(black_box(&unbroken), 120))
    });

    let short: Vec<Vec<String>> = (0..1000)
        .map(|i| vec![format!("w{}", i), ".".to_string()])
        .collect();
    group.bench_function("merge_1000", |b| {
        b.iter(|| merge_sentences(black_box(short.clone()), 120))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_normalization,
    bench_cjk_prepass,
    bench_text_segmentation,
);
criterion_main!(benches);

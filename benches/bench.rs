//! Criterion benchmarks for the hybrid search core.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use mushaf_search::embedding::HashEmbedder;
use mushaf_search::{Ayat, HybridSearchEngine};

/// Generate a synthetic verse corpus for benchmarking.
fn generate_corpus(count: usize) -> Vec<Ayat> {
    let arab = [
        "بسم الله الرحمن الرحيم",
        "الحمد لله رب العالمين",
        "قل هو الله احد",
        "مالك يوم الدين",
    ];
    let latin = [
        "bismillaahir-rahmaanir-rahiim",
        "alhamdu lillaahi rabbil-'aalamiin",
        "qul huwallaahu ahad",
        "maaliki yaumid-diin",
    ];
    let terjemahan = [
        "Dengan nama Allah Yang Maha Pengasih, Maha Penyayang.",
        "Segala puji bagi Allah, Tuhan seluruh alam.",
        "Katakanlah, Dialah Allah, Yang Maha Esa.",
        "Pemilik hari pembalasan.",
    ];

    (0..count)
        .map(|i| {
            let j = i % arab.len();
            Ayat::new(
                (i + 1) as u32,
                arab[j],
                latin[j],
                format!("{} (ayat {})", terjemahan[j], i + 1),
                "",
            )
        })
        .collect()
}

fn bench_embedding(c: &mut Criterion) {
    let mut group = c.benchmark_group("embedding");
    group.throughput(Throughput::Elements(1));

    group.bench_function("embed_uncached", |b| {
        let mut i = 0u64;
        let embedder = HashEmbedder::new();
        b.iter(|| {
            i += 1;
            black_box(embedder.embed(&format!("dengan nama allah {i}")))
        })
    });

    group.bench_function("embed_cached", |b| {
        let embedder = HashEmbedder::new();
        embedder.embed("dengan nama allah");
        b.iter(|| black_box(embedder.embed("dengan nama allah")))
    });

    group.finish();
}

fn bench_hybrid_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_search");

    for size in [10, 100, 286] {
        let engine = HybridSearchEngine::new(generate_corpus(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("search_{size}_verses"), |b| {
            b.iter(|| black_box(engine.search(black_box("allah maha pengasih"), 20)))
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let corpus = generate_corpus(100);
    c.bench_function("build_engine_100_verses", |b| {
        b.iter(|| black_box(HybridSearchEngine::new(corpus.clone())))
    });
}

criterion_group!(
    benches,
    bench_embedding,
    bench_hybrid_search,
    bench_index_build
);
criterion_main!(benches);

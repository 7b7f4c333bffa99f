//! Benchmarks for index construction and query-time similarity
//!
//! Run with: cargo bench --package vectorizer
//!
//! Uses a synthetic corpus so no dataset is required.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vectorizer::VectorIndex;

const WORDS: &[&str] = &[
    "robot", "future", "war", "space", "love", "city", "heist", "ghost", "detective", "island",
    "dragon", "school", "family", "murder", "alien", "desert", "ocean", "king", "revenge", "dream",
];

fn synthetic_corpus(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            let title = format!("title{i} title{i} title{i} title{i}");
            let body: Vec<&str> = (0..12).map(|k| WORDS[(i * 7 + k * 3) % WORDS.len()]).collect();
            format!("{} director{} {}", title, i % 40, body.join(" "))
        })
        .collect()
}

fn bench_build_index(c: &mut Criterion) {
    let corpus = synthetic_corpus(2000);
    let documents: Vec<&str> = corpus.iter().map(String::as_str).collect();

    c.bench_function("build_vector_index_2000", |b| {
        b.iter(|| black_box(VectorIndex::from_documents(black_box(&documents))))
    });
}

fn bench_query(c: &mut Criterion) {
    let corpus = synthetic_corpus(2000);
    let documents: Vec<&str> = corpus.iter().map(String::as_str).collect();
    let index = VectorIndex::from_documents(&documents);

    c.bench_function("query_similarities", |b| {
        b.iter(|| black_box(index.query_similarities(black_box("alien war in space"))))
    });
}

criterion_group!(benches, bench_build_index, bench_query);
criterion_main!(benches);

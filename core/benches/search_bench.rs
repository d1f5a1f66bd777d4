use criterion::{criterion_group, criterion_main, Criterion};
use docsearch_core::corpus::BUILTIN_DOCUMENTS;
use docsearch_core::vectorizer::IndexedCorpus;
use docsearch_core::{SearchEngine, VectorizerConfig};

fn bench_build(c: &mut Criterion) {
    let config = VectorizerConfig::default();
    c.bench_function("build_builtin_model", |b| b.iter(|| IndexedCorpus::build(&BUILTIN_DOCUMENTS, &config)));
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::builtin();
    engine.weighting_model();
    c.bench_function("search_and_evaluate", |b| b.iter(|| engine.search_and_evaluate("pain relief drug", 5)));
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);

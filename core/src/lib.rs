//! TF-IDF document search over a small fixed corpus, with retrieval-quality
//! evaluation against hand-curated relevance judgments.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod eval;
pub mod judgments;
pub mod ranker;
pub mod tokenizer;
pub mod vectorizer;

pub type DocId = u32;
pub type TermId = u32;

pub use config::{IdfScheme, VectorizerConfig};
pub use corpus::{Corpus, Document};
pub use engine::{default_engine, SearchEngine, SearchHit, SearchOutcome};
pub use eval::{BenchmarkReport, Metrics, QueryReport};
pub use judgments::RelevanceTable;
pub use vectorizer::{IndexedCorpus, SparseVector, WeightingModel};

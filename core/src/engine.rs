use crate::config::VectorizerConfig;
use crate::corpus::Corpus;
use crate::eval::{self, BenchmarkReport, Metrics, QueryReport};
use crate::judgments::RelevanceTable;
use crate::ranker;
use crate::vectorizer::IndexedCorpus;
use crate::DocId;
use lazy_static::lazy_static;
use serde::Serialize;
use std::sync::OnceLock;

lazy_static! {
    static ref DEFAULT_ENGINE: SearchEngine = SearchEngine::builtin();
}

/// Shared engine over the built-in corpus and judgments with the default configuration.
pub fn default_engine() -> &'static SearchEngine { &DEFAULT_ENGINE }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub k: usize,
    /// Documents with a non-zero score.
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
    /// `None` when the query has no relevance judgment.
    pub evaluation: Option<Metrics>,
}

/// Corpus, judgments and a weighting model built on first use.
///
/// The model is read-only once built, so one engine can serve any number of
/// concurrent searches by shared reference.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    judgments: RelevanceTable,
    config: VectorizerConfig,
    index: OnceLock<IndexedCorpus>,
}

impl SearchEngine {
    pub fn new(corpus: Corpus, judgments: RelevanceTable, config: VectorizerConfig) -> Self {
        Self { corpus, judgments, config, index: OnceLock::new() }
    }

    pub fn builtin() -> Self {
        Self::with_config(VectorizerConfig::default())
    }

    pub fn with_config(config: VectorizerConfig) -> Self {
        Self::new(Corpus::builtin(), RelevanceTable::builtin(), config)
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn judgments(&self) -> &RelevanceTable { &self.judgments }

    pub fn config(&self) -> &VectorizerConfig { &self.config }

    /// Vocabulary, idf weights and document vectors, built once.
    pub fn weighting_model(&self) -> &IndexedCorpus {
        self.index.get_or_init(|| {
            tracing::debug!(num_docs = self.corpus.len(), "building weighting model");
            let texts: Vec<&str> = self.corpus.texts().collect();
            IndexedCorpus::build(texts.as_slice(), &self.config)
        })
    }

    /// Every document ordered by descending similarity, ties by ascending id.
    /// Empty when no query term is in the vocabulary.
    pub fn rank(&self, query: &str) -> Vec<(DocId, f32)> {
        let index = self.weighting_model();
        let q = index.model.transform(query);
        ranker::rank(&q, &index.doc_vectors)
    }

    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let index = self.weighting_model();
        let q = index.model.transform(query);
        self.hits(ranker::search(&q, &index.doc_vectors, k))
    }

    /// Metrics for a FULL ranking (not a top-k prefix). `None` if the query is unjudged.
    pub fn evaluate(&self, query: &str, ranking: &[DocId], k: usize) -> Option<Metrics> {
        eval::evaluate(query, ranking, &self.judgments, k)
    }

    /// Rank once, return the top-k hits and evaluate the full ranking.
    pub fn search_and_evaluate(&self, query: &str, k: usize) -> SearchOutcome {
        let k = k.min(self.corpus.len());
        let mut ranked = self.rank(query);
        let ranked_ids: Vec<DocId> = ranked.iter().map(|(id, _)| *id).collect();
        let evaluation = self.evaluate(query, &ranked_ids, k);
        let total_hits = ranked.iter().filter(|(_, score)| *score > 0.0).count();
        ranker::truncate_top_k(&mut ranked, k);
        let results = self.hits(ranked);
        tracing::debug!(query, k, total_hits, evaluable = evaluation.is_some(), "search");
        SearchOutcome { query: query.to_string(), k, total_hits, results, evaluation }
    }

    /// Evaluate every judged query at `k`.
    pub fn benchmark(&self, k: usize) -> BenchmarkReport {
        let k = k.min(self.corpus.len());
        let queries = self
            .judgments
            .queries()
            .filter_map(|query| {
                let ranked_ids: Vec<DocId> = self.rank(query).into_iter().map(|(id, _)| id).collect();
                self.evaluate(query, &ranked_ids, k)
                    .map(|metrics| QueryReport { query: query.to_string(), metrics })
            })
            .collect();
        BenchmarkReport::from_queries(k, queries)
    }

    fn hits(&self, scored: Vec<(DocId, f32)>) -> Vec<SearchHit> {
        scored
            .into_iter()
            .filter_map(|(doc_id, score)| {
                self.corpus.get(doc_id).map(|d| SearchHit { doc_id, score, text: d.text.clone() })
            })
            .collect()
    }
}

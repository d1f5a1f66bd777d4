//! Retrieval-quality metrics: Precision@k, Recall@k, MRR and MAP.
//!
//! Precision and recall look at the top-k window only. MRR and MAP scan the
//! whole ranking, so callers must pass the full ordering from
//! [`crate::ranker::rank`], not a truncated top-k list.

use crate::judgments::RelevanceTable;
use crate::DocId;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub k: usize,
    pub precision_at_k: f64,
    pub recall_at_k: f64,
    pub mrr: f64,
    pub map: f64,
}

/// |relevant ∩ first k| / k. Zero when k is 0.
pub fn precision_at_k(ranked_ids: &[DocId], relevant: &BTreeSet<DocId>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    hits_in_top_k(ranked_ids, relevant, k) as f64 / k as f64
}

/// |relevant ∩ first k| / |relevant|. Zero when nothing is relevant.
pub fn recall_at_k(ranked_ids: &[DocId], relevant: &BTreeSet<DocId>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    hits_in_top_k(ranked_ids, relevant, k) as f64 / relevant.len() as f64
}

fn hits_in_top_k(ranked_ids: &[DocId], relevant: &BTreeSet<DocId>, k: usize) -> usize {
    let retrieved: BTreeSet<DocId> = ranked_ids.iter().take(k).copied().collect();
    retrieved.intersection(relevant).count()
}

/// 1 / rank of the first relevant id anywhere in the ranking, or 0.
pub fn reciprocal_rank(ranked_ids: &[DocId], relevant: &BTreeSet<DocId>) -> f64 {
    ranked_ids
        .iter()
        .position(|id| relevant.contains(id))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Sum of precision at each relevant position over the whole ranking, divided by |relevant|.
pub fn average_precision(ranked_ids: &[DocId], relevant: &BTreeSet<DocId>) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let mut found = 0usize;
    let mut sum = 0.0;
    for (i, id) in ranked_ids.iter().enumerate() {
        if relevant.contains(id) {
            found += 1;
            sum += found as f64 / (i + 1) as f64;
        }
    }
    sum / relevant.len() as f64
}

/// Keep the first occurrence of each id so repeats cannot be counted twice.
fn first_occurrences(ranked_ids: &[DocId]) -> Vec<DocId> {
    let mut seen = BTreeSet::new();
    ranked_ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Score a full ranking for `query`. Returns `None` when the table has no
/// judgment for the exact query string. Repeated ids count at their first position only.
pub fn evaluate(query: &str, ranked_ids: &[DocId], table: &RelevanceTable, k: usize) -> Option<Metrics> {
    let relevant = table.get(query)?;
    let ranked_ids = first_occurrences(ranked_ids);
    let ranked_ids = ranked_ids.as_slice();
    Some(Metrics {
        k,
        precision_at_k: precision_at_k(ranked_ids, relevant, k),
        recall_at_k: recall_at_k(ranked_ids, relevant, k),
        mrr: reciprocal_rank(ranked_ids, relevant),
        map: average_precision(ranked_ids, relevant),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub metrics: Metrics,
}

/// Metrics for every judged query plus their means.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub k: usize,
    pub queries: Vec<QueryReport>,
    pub mean: Metrics,
}

impl BenchmarkReport {
    pub fn from_queries(k: usize, queries: Vec<QueryReport>) -> Self {
        let mean = mean_metrics(k, queries.iter().map(|q| &q.metrics));
        Self { k, queries, mean }
    }
}

fn mean_metrics<'a>(k: usize, all: impl Iterator<Item = &'a Metrics>) -> Metrics {
    let mut mean = Metrics { k, precision_at_k: 0.0, recall_at_k: 0.0, mrr: 0.0, map: 0.0 };
    let mut n = 0usize;
    for m in all {
        mean.precision_at_k += m.precision_at_k;
        mean.recall_at_k += m.recall_at_k;
        mean.mrr += m.mrr;
        mean.map += m.map;
        n += 1;
    }
    if n > 0 {
        let n = n as f64;
        mean.precision_at_k /= n;
        mean.recall_at_k /= n;
        mean.mrr /= n;
        mean.map /= n;
    }
    mean
}

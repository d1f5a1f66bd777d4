use crate::vectorizer::SparseVector;
use crate::DocId;
use std::cmp::Ordering;

/// Cosine similarity clamped to [0, 1]. Zero if either side has zero norm.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 { return 0.0; }
    // f32 rounding can land a self-match a hair above 1
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Descending score, ties by ascending doc id.
fn by_score_then_id(a: &(DocId, f32), b: &(DocId, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Score every document and return the full ordering.
/// A zero query vector matches nothing and yields an empty ranking.
pub fn rank(query: &SparseVector, doc_vectors: &[SparseVector]) -> Vec<(DocId, f32)> {
    if query.is_zero() { return Vec::new(); }
    let mut scored: Vec<(DocId, f32)> = doc_vectors
        .iter()
        .enumerate()
        .map(|(i, d)| (i as DocId, cosine(query, d)))
        .collect();
    scored.sort_by(by_score_then_id);
    scored
}

/// Top `top_k` of [`rank`]. `top_k` beyond the corpus size returns every document.
pub fn search(query: &SparseVector, doc_vectors: &[SparseVector], top_k: usize) -> Vec<(DocId, f32)> {
    if top_k == 0 { return Vec::new(); }
    let mut scored = rank(query, doc_vectors);
    truncate_top_k(&mut scored, top_k);
    scored
}

/// Cut a full ranking down to its first `top_k` entries. A larger `top_k` keeps everything.
pub fn truncate_top_k(ranked: &mut Vec<(DocId, f32)>, top_k: usize) {
    ranked.truncate(top_k);
}

/// Clamp a caller-supplied k into [0, corpus_size].
pub fn clamp_top_k(k: i64, corpus_size: usize) -> usize {
    if k <= 0 {
        0
    } else {
        usize::try_from(k).map_or(corpus_size, |k| k.min(corpus_size))
    }
}

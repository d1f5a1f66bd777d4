use crate::config::VectorizerConfig;
use crate::TermId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Sparse term-weight vector. Entries are sorted by term id with no zero weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    fn from_weights(weights: BTreeMap<TermId, f32>) -> Self {
        let entries = weights.into_iter().filter(|(_, w)| *w != 0.0).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, term_id: TermId) -> f32 {
        self.entries
            .binary_search_by_key(&term_id, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta == tb {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Scale to unit length. A zero vector stays zero.
    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 { return; }
        for (_, w) in self.entries.iter_mut() { *w /= norm; }
    }
}

/// Frozen vocabulary and idf weights. Term ids follow lexicographic term order.
#[derive(Debug, Clone, Serialize)]
pub struct WeightingModel {
    config: VectorizerConfig,
    terms: Vec<String>,
    #[serde(skip)]
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    num_docs: u32,
}

impl WeightingModel {
    pub fn config(&self) -> &VectorizerConfig { &self.config }

    /// Vocabulary in term-id order.
    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn idf_weights(&self) -> &[f32] { &self.idf }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|tid| self.idf[tid as usize])
    }

    pub fn document_frequency(&self, term: &str) -> Option<u32> {
        self.term_id(term).map(|tid| self.df[tid as usize])
    }

    pub fn vocabulary_size(&self) -> usize { self.terms.len() }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    /// Project text into the model's vector space. Terms outside the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut tf_raw: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in self.config.analyzer.analyze(text) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *tf_raw.entry(tid).or_insert(0) += 1;
            }
        }
        self.weigh(tf_raw)
    }

    fn weigh(&self, tf_raw: BTreeMap<TermId, u32>) -> SparseVector {
        let weights = tf_raw
            .into_iter()
            .map(|(tid, count)| (tid, self.config.tf(count) * self.idf[tid as usize]))
            .collect();
        let mut v = SparseVector::from_weights(weights);
        v.l2_normalize();
        v
    }
}

/// A weighting model together with the vectors of the documents it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedCorpus {
    pub model: WeightingModel,
    pub doc_vectors: Vec<SparseVector>,
}

impl IndexedCorpus {
    pub fn build<S: AsRef<str>>(documents: &[S], config: &VectorizerConfig) -> Self {
        let (model, doc_vectors) = build(documents, config);
        Self { model, doc_vectors }
    }
}

/// Fit the vocabulary and idf weights over `documents` and vectorize each of them.
pub fn build<S: AsRef<str>>(documents: &[S], config: &VectorizerConfig) -> (WeightingModel, Vec<SparseVector>) {
    // Per-document raw counts keyed by term text; BTreeMap keeps vocabulary order deterministic.
    let mut doc_counts: Vec<BTreeMap<String, u32>> = Vec::with_capacity(documents.len());
    let mut df_by_term: BTreeMap<String, u32> = BTreeMap::new();
    for doc in documents {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for term in config.analyzer.analyze(doc.as_ref()) {
            *counts.entry(term).or_insert(0) += 1;
        }
        for term in counts.keys() {
            *df_by_term.entry(term.clone()).or_insert(0) += 1;
        }
        doc_counts.push(counts);
    }

    let num_docs = documents.len() as u32;
    let mut terms = Vec::with_capacity(df_by_term.len());
    let mut df = Vec::with_capacity(df_by_term.len());
    let mut dictionary = HashMap::with_capacity(df_by_term.len());
    for (tid, (term, df_t)) in df_by_term.into_iter().enumerate() {
        dictionary.insert(term.clone(), tid as TermId);
        terms.push(term);
        df.push(df_t);
    }
    let idf = df.iter().map(|&df_t| config.idf.idf(num_docs, df_t)).collect();

    let model = WeightingModel { config: *config, terms, dictionary, df, idf, num_docs };

    let doc_vectors = doc_counts
        .into_iter()
        .map(|counts| {
            let tf_raw = counts
                .into_iter()
                .filter_map(|(term, count)| model.dictionary.get(&term).map(|&tid| (tid, count)))
                .collect();
            model.weigh(tf_raw)
        })
        .collect();

    tracing::info!(num_docs, num_terms = model.terms.len(), idf = %config.idf, "built weighting model");
    (model, doc_vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdfScheme;

    fn docs() -> Vec<&'static str> {
        vec!["rust systems programming", "rust rust web", "the garden"]
    }

    #[test]
    fn vocabulary_is_sorted_and_stopwords_dropped() {
        let (model, _) = build(&docs(), &VectorizerConfig::default());
        assert_eq!(model.terms(), &["garden", "programming", "rust", "systems", "web"]);
        assert!(model.term_id("the").is_none());
        assert_eq!(model.document_frequency("rust"), Some(2));
    }

    #[test]
    fn document_vectors_are_unit_length() {
        let (_, vectors) = build(&docs(), &VectorizerConfig::default());
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn empty_document_yields_zero_vector() {
        let (_, vectors) = build(&["aspirin", "", "the of"], &VectorizerConfig::default());
        assert!(!vectors[0].is_zero());
        assert!(vectors[1].is_zero());
        assert!(vectors[2].is_zero());
    }

    #[test]
    fn plain_idf_zeroes_ubiquitous_terms() {
        let cfg = VectorizerConfig { idf: IdfScheme::Plain, ..Default::default() };
        let (model, vectors) = build(&["drug pain", "drug fever"], &cfg);
        assert_eq!(model.idf("drug"), Some(0.0));
        let drug = model.term_id("drug").unwrap();
        assert_eq!(vectors[0].get(drug), 0.0);
        assert!((vectors[0].norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn transform_drops_unknown_terms() {
        let (model, vectors) = build(&docs(), &VectorizerConfig::default());
        assert!(model.transform("kubernetes").is_zero());
        assert!(model.transform("").is_zero());
        assert!(model.transform("the of and").is_zero());
        let q = model.transform("Rust, kubernetes!");
        assert_eq!(q.entries().len(), 1);
        assert!((q.norm() - 1.0).abs() < 1e-5);
        assert!(q.dot(&vectors[1]) > q.dot(&vectors[0]));
    }

    #[test]
    fn build_is_deterministic() {
        let (m1, v1) = build(&docs(), &VectorizerConfig::default());
        let (m2, v2) = build(&docs(), &VectorizerConfig::default());
        assert_eq!(m1.terms(), m2.terms());
        assert_eq!(m1.idf_weights(), m2.idf_weights());
        assert_eq!(v1, v2);
    }

    #[test]
    fn dot_matches_dense_product() {
        let (model, vectors) = build(&docs(), &VectorizerConfig::default());
        let dense: f32 = (0..model.vocabulary_size() as TermId)
            .map(|t| vectors[0].get(t) * vectors[1].get(t))
            .sum();
        assert!((vectors[0].dot(&vectors[1]) - dense).abs() < 1e-6);
    }
}

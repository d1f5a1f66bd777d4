use crate::DocId;
use std::collections::BTreeSet;

/// Hand-curated relevance judgments keyed by the exact query string.
///
/// Lookups are byte-for-byte: "Pain relief drug" or "pain relief drug " do not
/// match the "pain relief drug" entry and are therefore not evaluable.
#[derive(Debug, Clone, Default)]
pub struct RelevanceTable {
    entries: Vec<(String, BTreeSet<DocId>)>,
}

impl RelevanceTable {
    pub fn new() -> Self { Self::default() }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("pain relief drug", [0, 7, 11]);
        table.insert("hypertension medicine", [1, 18]);
        table.insert("cancer treatment", [2, 17]);
        table.insert("diabetes medication", [3, 6, 10]);
        table
    }

    /// Adds or replaces the judgment for `query`. Insertion order is kept for iteration.
    pub fn insert<I>(&mut self, query: impl Into<String>, relevant: I)
    where
        I: IntoIterator<Item = DocId>,
    {
        let query = query.into();
        let relevant: BTreeSet<DocId> = relevant.into_iter().collect();
        match self.entries.iter_mut().find(|(q, _)| *q == query) {
            Some((_, existing)) => *existing = relevant,
            None => self.entries.push((query, relevant)),
        }
    }

    pub fn get(&self, query: &str) -> Option<&BTreeSet<DocId>> {
        self.entries.iter().find(|(q, _)| q == query).map(|(_, rel)| rel)
    }

    pub fn contains(&self, query: &str) -> bool { self.get(query).is_some() }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(q, _)| q.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<DocId>)> {
        self.entries.iter().map(|(q, rel)| (q.as_str(), rel))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

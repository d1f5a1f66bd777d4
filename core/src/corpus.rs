use crate::DocId;
use anyhow::{bail, Result};
use serde::Serialize;

/// The built-in drug and disease corpus. Position in this list is the document id.
pub const BUILTIN_DOCUMENTS: [&str; 20] = [
    "Aspirin is a nonsteroidal anti-inflammatory drug (NSAID) used for pain relief, fever reduction, and antiplatelet effects.",
    "Hypertension, or high blood pressure, is a serious medical condition that significantly increases the risks of heart, brain, kidney and other diseases.",
    "Chemotherapy is a drug treatment that uses powerful chemicals to kill fast-growing cells in your body. It is most often used to treat cancer.",
    "Insulin is a hormone made by the pancreas that allows your body to use sugar (glucose) from carbohydrates in the food that you eat for energy.",
    "Migraine is a severe headache often accompanied by symptoms such as nausea, vomiting, and extreme sensitivity to light and sound.",
    "Antibiotics are medicines that fight bacterial infections in people and animals. They work by killing the bacteria or by making it difficult for the bacteria to grow and multiply.",
    "Metformin is a medication used to treat type 2 diabetes by improving how the body handles insulin.",
    "Ibuprofen is another NSAID used for pain, fever, and inflammation. It is commonly used for headaches and muscle aches.",
    "Chronic fatigue syndrome (CFS) is a complex illness characterized by extreme fatigue that isn't explained by an underlying medical condition.",
    "Statins are a class of drugs used to lower cholesterol levels in the blood. They are widely prescribed for people at risk of cardiovascular disease.",
    "Diabetes mellitus is a chronic metabolic disease characterized by high blood sugar levels.",
    "The use of painkillers for managing chronic back pain is a common approach.",
    "Heart disease is a broad term for a range of conditions that affect your heart. Medications are a key part of treatment.",
    "Fluoxetine (Prozac) is a selective serotonin reuptake inhibitor (SSRI) used to treat depression, obsessive-compulsive disorder, and bulimia nervosa.",
    "Rheumatoid arthritis is an autoimmune disease in which the immune system mistakenly attacks the body's own joints.",
    "Asthma is a chronic lung disease that inflames and narrows the airways, causing wheezing, shortness of breath, and chest tightness.",
    "Prednisone is a corticosteroid used to treat inflammatory conditions like asthma and arthritis.",
    "The new gene therapy targets specific cancer cells with minimal side effects.",
    "A new study explores the link between diet, high blood pressure, and cardiovascular health.",
    "Vaccines provide immunity against infectious diseases by stimulating the body's immune system to fight off pathogens.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub doc_id: DocId,
    pub text: String,
}

/// An ordered, immutable document collection.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Assigns sequential ids in insertion order. Empty texts are kept; an empty list is rejected.
    pub fn new<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<Document> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document { doc_id: i as DocId, text: text.into() })
            .collect();
        if documents.is_empty() {
            bail!("corpus must contain at least one document");
        }
        Ok(Self { documents })
    }

    pub fn builtin() -> Self {
        let documents = BUILTIN_DOCUMENTS
            .iter()
            .enumerate()
            .map(|(i, text)| Document { doc_id: i as DocId, text: (*text).to_string() })
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn get(&self, doc_id: DocId) -> Option<&Document> { self.documents.get(doc_id as usize) }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let corpus = Corpus::new(["alpha", "", "gamma"]).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get(1).map(|d| d.text.as_str()), Some(""));
        assert_eq!(corpus.get(2).map(|d| d.doc_id), Some(2));
        assert!(corpus.get(3).is_none());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(Corpus::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn builtin_has_twenty_documents() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.len(), 20);
        assert!(corpus.get(0).unwrap().text.starts_with("Aspirin"));
        assert!(corpus.get(19).unwrap().text.starts_with("Vaccines"));
    }
}

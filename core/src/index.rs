use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::document::Collection;
use crate::tokenizer::Tokenizer;
use crate::DocId;

/// Occurrences of one term in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub positions: Vec<u32>, // strictly increasing
}

impl Posting {
    /// Term frequency within the document.
    pub fn tf(&self) -> u32 { self.positions.len() as u32 }
}

pub type TitleIndex = HashMap<DocId, String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub postings: HashMap<String, Vec<Posting>>, // postings in document insertion order
    pub num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of documents containing `term`; 0 for unknown terms.
    pub fn doc_freq(&self, term: &str) -> u32 { self.postings(term).len() as u32 }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

/// Build the positional index and the title lookup for a collection snapshot.
pub fn build_index(collection: &Collection, tokenizer: &Tokenizer) -> (InvertedIndex, TitleIndex) {
    let mut index = InvertedIndex::new();
    let mut titles = TitleIndex::with_capacity(collection.len());

    for doc in collection {
        titles.insert(doc.id, doc.title.clone());

        let mut doc_terms: HashMap<String, Vec<u32>> = HashMap::new();
        for (term, pos) in tokenizer.analyze(&doc.description) {
            doc_terms.entry(term).or_default().push(pos);
        }
        for (term, positions) in doc_terms {
            index.postings.entry(term).or_default().push(Posting { doc_id: doc.id, positions });
        }
    }
    index.num_docs = collection.len() as u32;

    tracing::info!(num_docs = index.num_docs, num_terms = index.num_terms(), "built inverted index");
    (index, titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn collection() -> Collection {
        [
            Document::new(10, "first", "flu season flu shots flu"),
            Document::new(2, "second", "the flu is back"),
            Document::new(5, "third", "nothing here"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn accumulates_positions_per_document() {
        let (index, _) = build_index(&collection(), &Tokenizer::default());
        let flu = index.postings("flu");
        assert_eq!(flu.len(), 2);
        assert_eq!(flu[0], Posting { doc_id: 10, positions: vec![0, 2, 4] });
        assert_eq!(flu[1], Posting { doc_id: 2, positions: vec![1] });
        assert_eq!(index.doc_freq("flu"), 2);
        assert_eq!(index.doc_freq("absent"), 0);
    }

    #[test]
    fn records_titles_verbatim() {
        let (index, titles) = build_index(&collection(), &Tokenizer::default());
        assert_eq!(titles.get(&5).map(String::as_str), Some("third"));
        assert_eq!(titles.len(), 3);
        assert_eq!(index.num_docs, 3);
    }

    #[test]
    fn empty_collection_builds_empty_index() {
        let (index, titles) = build_index(&Collection::new(), &Tokenizer::default());
        assert!(index.is_empty());
        assert!(titles.is_empty());
    }
}

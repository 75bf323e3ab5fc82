use std::collections::{BTreeSet, HashSet};

use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::tokenizer::Tokenizer;
use crate::DocId;

/// Ids of the documents containing every term of `query`.
///
/// A query that normalizes to no terms matches nothing. Candidate sets are
/// intersected smallest first and the scan stops once the result is empty.
pub fn match_query(query: &str, index: Option<&InvertedIndex>, tokenizer: &Tokenizer) -> Result<BTreeSet<DocId>> {
    let index = match index {
        Some(index) if !index.is_empty() => index,
        _ => return Err(SearchError::IndexUnavailable),
    };

    let terms = tokenizer.normalize(query);
    let mut seen = HashSet::new();
    let mut postings: Vec<_> = terms
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .map(|t| index.postings(t))
        .collect();
    postings.sort_by_key(|p| p.len());

    let mut lists = postings.into_iter();
    let mut matched: BTreeSet<DocId> = match lists.next() {
        Some(first) => first.iter().map(|p| p.doc_id).collect(),
        None => return Ok(BTreeSet::new()),
    };
    for list in lists {
        if matched.is_empty() { break; }
        let ids: HashSet<DocId> = list.iter().map(|p| p.doc_id).collect();
        matched.retain(|id| ids.contains(id));
    }
    Ok(matched)
}

/// Number of documents containing an already normalized term.
pub fn document_frequency(term: &str, index: &InvertedIndex) -> u32 { index.doc_freq(term) }

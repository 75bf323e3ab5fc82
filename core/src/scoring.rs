use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::{RankConfig, RankScope};
use crate::document::Collection;
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::match_query;
use crate::tokenizer::Tokenizer;
use crate::DocId;

/// Term → tf-idf weight for one document (or one query).
pub type DocumentVector = HashMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Logarithmic tf times idf: `(1 + ln tf) * ln(n / df)`, or 0 when either frequency is 0.
///
/// Defined for `n >= 1` and `df <= n`.
pub fn tf_idf(tf: u32, df: u32, n: u32) -> f64 {
    if tf == 0 || df == 0 {
        return 0.0;
    }
    let tf = 1.0 + (tf as f64).ln();
    let idf = (n as f64 / df as f64).ln();
    tf * idf
}

fn require(collection: Option<&Collection>) -> Result<&Collection> {
    match collection {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(SearchError::CollectionUnavailable),
    }
}

/// Weight vector of a single document, keyed by its normalized terms.
pub fn document_vector(
    doc_id: DocId,
    index: &InvertedIndex,
    collection: Option<&Collection>,
    tokenizer: &Tokenizer,
) -> Result<DocumentVector> {
    let collection = require(collection)?;
    let doc = collection.get(doc_id).ok_or(SearchError::UnknownDocument(doc_id))?;
    let n = collection.len() as u32;

    let mut tf_counts: HashMap<String, u32> = HashMap::new();
    for term in tokenizer.normalize(&doc.description) {
        *tf_counts.entry(term).or_insert(0) += 1;
    }
    let vector = tf_counts
        .into_iter()
        .map(|(term, tf)| {
            let weight = tf_idf(tf, index.doc_freq(&term), n);
            (term, weight)
        })
        .collect();
    Ok(vector)
}

/// Weight vectors for every document of the collection.
pub fn collection_vectors(
    collection: &Collection,
    index: &InvertedIndex,
    tokenizer: &Tokenizer,
) -> Result<HashMap<DocId, DocumentVector>> {
    collection
        .as_slice()
        .par_iter()
        .map(|doc| document_vector(doc.id, index, Some(collection), tokenizer).map(|v| (doc.id, v)))
        .collect()
}

/// Euclidean norm of each document vector.
pub fn vector_lengths(vectors: &HashMap<DocId, DocumentVector>) -> HashMap<DocId, f64> {
    vectors
        .iter()
        .map(|(id, v)| (*id, v.values().map(|w| w * w).sum::<f64>().sqrt()))
        .collect()
}

/// Rank documents against `query` by length-normalized tf-idf dot product.
///
/// Scores are sorted descending with ties broken by ascending id. Documents
/// with a zero or unknown length score 0.
pub fn rank(
    query: &str,
    collection: Option<&Collection>,
    index: &InvertedIndex,
    lengths: &HashMap<DocId, f64>,
    tokenizer: &Tokenizer,
    options: &RankConfig,
) -> Result<Vec<ScoredDoc>> {
    let collection = require(collection)?;
    let n = collection.len() as u32;

    // ordered so the float sums below do not depend on hash order
    let mut query_tf: BTreeMap<String, u32> = BTreeMap::new();
    for term in tokenizer.normalize(query) {
        *query_tf.entry(term).or_insert(0) += 1;
    }

    let mut dot: HashMap<DocId, f64> = HashMap::new();
    for (term, qtf) in &query_tf {
        let postings = index.postings(term);
        let df = postings.len() as u32;
        let query_weight = tf_idf(*qtf, df, n);
        if query_weight == 0.0 {
            continue;
        }
        for p in postings {
            *dot.entry(p.doc_id).or_insert(0.0) += query_weight * tf_idf(p.tf(), df, n);
        }
    }

    let candidates: Vec<DocId> = match options.scope {
        RankScope::Collection => collection.ids().collect(),
        RankScope::Conjunctive => {
            let matched = if index.is_empty() { BTreeSet::new() } else { match_query(query, Some(index), tokenizer)? };
            matched.into_iter().filter(|id| collection.contains(*id)).collect()
        }
    };

    let mut scored: Vec<ScoredDoc> = candidates
        .into_iter()
        .map(|doc_id| {
            let score = match lengths.get(&doc_id) {
                Some(&len) if len > 0.0 => dot.get(&doc_id).copied().unwrap_or(0.0) / len,
                _ => 0.0,
            };
            ScoredDoc { doc_id, score }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.doc_id.cmp(&b.doc_id))
    });
    if let Some(limit) = options.limit {
        scored.truncate(limit);
    }
    Ok(scored)
}

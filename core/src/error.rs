use thiserror::Error;

use crate::DocId;

/// Errors surfaced by the retrieval core.
///
/// All of them signal API misuse (a required structure was not set up);
/// empty queries, absent terms and zero-length vectors are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Boolean matching was invoked without a built index.
    #[error("no inverted index available")]
    IndexUnavailable,

    /// Scoring was invoked without a document collection.
    #[error("no document collection available")]
    CollectionUnavailable,

    #[error("document {0} is not part of the collection")]
    UnknownDocument(DocId),
}

pub type Result<T> = std::result::Result<T, SearchError>;

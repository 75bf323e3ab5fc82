//! Ranked retrieval over a small in-memory document collection.
//!
//! Documents are normalized by a [`Tokenizer`], indexed into a positional
//! [`InvertedIndex`], filtered by conjunctive [`match_query`] and ranked by
//! tf-idf weights normalized by document vector length.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod scoring;
pub mod tokenizer;

pub use config::{EngineConfig, RankConfig, RankScope, StemmerLanguage, TokenizerConfig};
pub use document::{Collection, Document};
pub use engine::{SearchEngine, SearchHit, Snapshot};
pub use error::{Result, SearchError};
pub use index::{build_index, InvertedIndex, Posting, TitleIndex};
pub use query::{document_frequency, match_query};
pub use scoring::{collection_vectors, document_vector, rank, tf_idf, vector_lengths, DocumentVector, ScoredDoc};
pub use tokenizer::Tokenizer;

pub type DocId = u64;

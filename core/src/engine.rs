use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::document::Collection;
use crate::error::Result;
use crate::index::{build_index, InvertedIndex, TitleIndex};
use crate::query::match_query;
use crate::scoring::{collection_vectors, rank, vector_lengths, DocumentVector};
use crate::tokenizer::Tokenizer;
use crate::DocId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub title: String,
}

/// Everything derived from one version of the collection. Never mutated once built.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub collection: Collection,
    pub index: InvertedIndex,
    pub titles: TitleIndex,
    pub vectors: HashMap<DocId, DocumentVector>,
    pub lengths: HashMap<DocId, f64>,
}

impl Snapshot {
    pub fn build(collection: Collection, tokenizer: &Tokenizer) -> Result<Self> {
        let start = Instant::now();
        let (index, titles) = build_index(&collection, tokenizer);
        let vectors = collection_vectors(&collection, &index, tokenizer)?;
        let lengths = vector_lengths(&vectors);
        tracing::info!(num_docs = collection.len(), took_ms = start.elapsed().as_millis() as u64, "snapshot ready");
        Ok(Self { collection, index, titles, vectors, lengths })
    }
}

/// Build-once, query-many front end.
///
/// Queries read an `Arc` of the current snapshot; [`rebuild`](Self::rebuild)
/// prepares a complete replacement before swapping it in, so a query never
/// observes a partially built index.
pub struct SearchEngine {
    config: EngineConfig,
    tokenizer: Tokenizer,
    current: RwLock<Arc<Snapshot>>,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let tokenizer = Tokenizer::new(&config.tokenizer);
        Self { config, tokenizer, current: RwLock::new(Arc::new(Snapshot::default())) }
    }

    pub fn build(config: EngineConfig, collection: Collection) -> Result<Self> {
        let engine = Self::new(config);
        engine.rebuild(collection)?;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    /// Replace the served snapshot with one built from `collection`.
    pub fn rebuild(&self, collection: Collection) -> Result<()> {
        let snapshot = Snapshot::build(collection, &self.tokenizer)?;
        *self.current.write() = Arc::new(snapshot);
        Ok(())
    }

    pub fn snapshot(&self) -> Arc<Snapshot> { self.current.read().clone() }

    /// Ranked hits for `query` under the configured scope and limit.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let start = Instant::now();
        let snap = self.snapshot();
        let ranked = rank(query, Some(&snap.collection), &snap.index, &snap.lengths, &self.tokenizer, &self.config.rank)?;
        let hits: Vec<SearchHit> = ranked
            .into_iter()
            .map(|r| SearchHit {
                doc_id: r.doc_id,
                score: r.score,
                title: snap.titles.get(&r.doc_id).cloned().unwrap_or_default(),
            })
            .collect();
        tracing::debug!(query, hits = hits.len(), took_us = start.elapsed().as_micros() as u64, "search");
        Ok(hits)
    }

    /// Ids of documents containing every query term.
    pub fn matching(&self, query: &str) -> Result<BTreeSet<DocId>> {
        let snap = self.snapshot();
        match_query(query, Some(&snap.index), &self.tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RankConfig, RankScope};
    use crate::document::Document;
    use crate::error::SearchError;

    fn docs(texts: &[(DocId, &str, &str)]) -> Collection {
        texts.iter().map(|(id, title, body)| Document::new(*id, *title, *body)).collect()
    }

    #[test]
    fn search_attaches_titles() {
        let engine = SearchEngine::build(
            EngineConfig::default(),
            docs(&[(1, "WHO", "malaria cases fall"), (2, "CDC", "influenza cases rise")]),
        )
        .unwrap();
        let hits = engine.search("malaria").unwrap();
        assert_eq!(hits[0].doc_id, 1);
        assert_eq!(hits[0].title, "WHO");
        assert!(hits[0].score > 0.0);
        assert_eq!(hits[1].score, 0.0);
    }

    #[test]
    fn empty_engine_reports_missing_collection() {
        let engine = SearchEngine::new(EngineConfig::default());
        assert_eq!(engine.search("anything"), Err(SearchError::CollectionUnavailable));
        assert_eq!(engine.matching("anything"), Err(SearchError::IndexUnavailable));
    }

    #[test]
    fn rebuild_swaps_snapshot_without_touching_readers() {
        let engine = SearchEngine::build(EngineConfig::default(), docs(&[(1, "", "old text")])).unwrap();
        let before = engine.snapshot();
        engine.rebuild(docs(&[(1, "", "new text"), (2, "", "more text")])).unwrap();
        assert_eq!(before.collection.len(), 1);
        assert_eq!(engine.snapshot().collection.len(), 2);
        assert_eq!(engine.matching("new").unwrap(), BTreeSet::from([1]));
    }

    #[test]
    fn conjunctive_limit_config() {
        let config = EngineConfig {
            rank: RankConfig { scope: RankScope::Conjunctive, limit: Some(1) },
            ..EngineConfig::default()
        };
        let engine = SearchEngine::build(
            config,
            docs(&[(1, "", "dengue fever"), (2, "", "dengue fever fever"), (3, "", "yellow fever")]),
        )
        .unwrap();
        let hits = engine.search("dengue fever").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].doc_id == 1 || hits[0].doc_id == 2);
    }
}

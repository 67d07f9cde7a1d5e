//! Semantic-search provider capability.
//!
//! The engine does not compute embeddings or nearest-neighbor similarity
//! itself; it consumes a ranked list from an injected [`SemanticSearch`]
//! implementation. Two implementations ship with the crate: an in-memory one
//! backed by a query -> ranking map, and a file-backed one that loads such a
//! map from JSON (precomputed by an external embedding pipeline).

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One entry of a semantic ranker's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticHit {
    /// Document id.
    #[serde(alias = "id")]
    pub doc_id: u64,
    /// Similarity score, higher is more similar.
    pub score: f64,
}

/// A black-box semantic search provider.
///
/// Returns at most `limit` results ordered by descending similarity. How the
/// ranking is computed (embeddings, ANN index, remote service) is the
/// provider's business.
pub trait SemanticSearch: Send + Sync {
    /// Rank documents by semantic similarity to the query.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SemanticHit>>;
}

/// An in-memory provider backed by a query -> ranking map.
///
/// Queries are matched after trimming and lower-casing; unknown queries yield
/// an empty ranking, which the fusion layer treats as "this ranker retrieved
/// nothing".
#[derive(Debug, Default)]
pub struct StaticSemanticSearch {
    rankings: HashMap<String, Vec<SemanticHit>>,
}

impl StaticSemanticSearch {
    /// Create an empty provider.
    pub fn new() -> Self {
        StaticSemanticSearch::default()
    }

    /// Register the ranking returned for a query.
    pub fn insert<S: Into<String>>(&mut self, query: S, hits: Vec<SemanticHit>) {
        self.rankings.insert(canonical_query(&query.into()), hits);
    }

    /// Number of registered queries.
    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    /// Whether no queries are registered.
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

impl SemanticSearch for StaticSemanticSearch {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SemanticHit>> {
        let mut hits = match self.rankings.get(&canonical_query(query)) {
            Some(hits) => hits.clone(),
            None => {
                log::warn!("no semantic ranking registered for query: {query:?}");
                Vec::new()
            }
        };
        hits.truncate(limit);
        Ok(hits)
    }
}

/// A provider that loads precomputed rankings from a JSON file.
///
/// The file maps each query string to its ranked hit list:
///
/// ```json
/// {"space movie": [{"id": 3, "score": 0.91}, {"id": 1, "score": 0.88}]}
/// ```
#[derive(Debug)]
pub struct PrecomputedSemanticSearch {
    inner: StaticSemanticSearch,
}

impl PrecomputedSemanticSearch {
    /// Load rankings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let rankings: HashMap<String, Vec<SemanticHit>> = serde_json::from_reader(reader)?;

        let mut inner = StaticSemanticSearch::new();
        for (query, hits) in rankings {
            inner.insert(query, hits);
        }
        log::info!(
            "loaded precomputed semantic rankings for {} queries",
            inner.len()
        );
        Ok(PrecomputedSemanticSearch { inner })
    }
}

impl SemanticSearch for PrecomputedSemanticSearch {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SemanticHit>> {
        self.inner.search(query, limit)
    }
}

fn canonical_query(query: &str) -> String {
    query.trim().to_lowercase()
}

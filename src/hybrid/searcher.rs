//! Hybrid search orchestration.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::document::Document;
use crate::error::{Result, XystonError};
use crate::fusion::{hybrid_score, min_max_normalize, rrf_contribution};
use crate::hybrid::semantic::{SemanticHit, SemanticSearch};
use crate::hybrid::types::{HybridHit, RrfHit};
use crate::index::InvertedIndex;

/// How many candidates to request from each ranker, per result slot.
///
/// Oversampling reduces the chance that a document belonging in the fused
/// top-`limit` is missed because it ranked outside one ranker's window.
const CANDIDATE_OVERSAMPLE: usize = 50;

/// Composes the inverted index with an injected semantic-search provider.
///
/// Both search modes are pure with respect to their inputs: given a fixed
/// index and provider state, identical query and parameters produce identical
/// ordered output. The query path holds no per-query scratch state on the
/// searcher, so concurrent queries are safe.
pub struct HybridSearcher {
    index: InvertedIndex,
    semantic: Box<dyn SemanticSearch>,
}

impl HybridSearcher {
    /// Create a searcher over an already-built index.
    pub fn new(index: InvertedIndex, semantic: Box<dyn SemanticSearch>) -> Self {
        HybridSearcher { index, semantic }
    }

    /// Build the index from the corpus and create a searcher over it.
    pub fn from_documents(documents: &[Document], semantic: Box<dyn SemanticSearch>) -> Self {
        let mut index = InvertedIndex::new();
        index.build(documents);
        HybridSearcher::new(index, semantic)
    }

    /// The underlying inverted index.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Weighted hybrid search.
    ///
    /// Retrieves an oversampled candidate list from each ranker, min-max
    /// normalizes each ranker's scores independently, scores every candidate
    /// as `alpha * bm25 + (1 - alpha) * semantic` (0.0 for the side that did
    /// not retrieve it), and returns the top `limit`, best first.
    pub fn weighted_search(&self, query: &str, alpha: f64, limit: usize) -> Result<Vec<HybridHit>> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(XystonError::invalid_argument(format!(
                "alpha must be in [0, 1], got {alpha}"
            )));
        }
        check_limit(limit)?;

        let (bm25_results, semantic_results) = self.retrieve(query, limit)?;

        let bm25_scores: Vec<f64> = bm25_results.iter().map(|&(_, score)| score).collect();
        let semantic_scores: Vec<f64> = semantic_results.iter().map(|hit| hit.score).collect();
        let bm25_normalized = min_max_normalize(&bm25_scores);
        let semantic_normalized = min_max_normalize(&semantic_scores);

        // Accumulate candidates in first-seen order (BM25 list first) so tie
        // ordering is reproducible.
        let mut order: Vec<u64> = Vec::new();
        let mut scores: HashMap<u64, (f64, f64)> = HashMap::new();

        for (i, &(doc_id, _)) in bm25_results.iter().enumerate() {
            if let Entry::Vacant(entry) = scores.entry(doc_id) {
                entry.insert((bm25_normalized[i], 0.0));
                order.push(doc_id);
            }
        }
        for (i, hit) in semantic_results.iter().enumerate() {
            match scores.entry(hit.doc_id) {
                Entry::Occupied(mut entry) => entry.get_mut().1 = semantic_normalized[i],
                Entry::Vacant(entry) => {
                    entry.insert((0.0, semantic_normalized[i]));
                    order.push(hit.doc_id);
                }
            }
        }

        let mut hits: Vec<HybridHit> = Vec::with_capacity(order.len());
        for doc_id in order {
            let Some(document) = self.index.document(doc_id) else {
                log::warn!("semantic provider returned unknown document id {doc_id}, skipping");
                continue;
            };
            let (bm25_score, semantic_score) = scores[&doc_id];
            hits.push(HybridHit {
                doc_id,
                title: document.title.clone(),
                description: document.description.clone(),
                hybrid_score: hybrid_score(bm25_score, semantic_score, alpha),
                bm25_score,
                semantic_score,
            });
        }

        hits.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        Ok(hits)
    }

    /// Reciprocal-rank-fusion search.
    ///
    /// Same oversampled dual retrieval as [`weighted_search`], but fuses on
    /// 1-based rank positions instead of raw scores: each ranker contributes
    /// `1 / (rank + k)` for the documents it retrieved, and a document seen
    /// by both rankers accumulates both terms.
    ///
    /// [`weighted_search`]: HybridSearcher::weighted_search
    pub fn rrf_search(&self, query: &str, k: f64, limit: usize) -> Result<Vec<RrfHit>> {
        if k <= 0.0 {
            return Err(XystonError::invalid_argument(format!(
                "rrf k must be positive, got {k}"
            )));
        }
        check_limit(limit)?;

        let (bm25_results, semantic_results) = self.retrieve(query, limit)?;

        let mut order: Vec<u64> = Vec::new();
        let mut ranks: HashMap<u64, (usize, usize)> = HashMap::new();

        for (i, &(doc_id, _)) in bm25_results.iter().enumerate() {
            if let Entry::Vacant(entry) = ranks.entry(doc_id) {
                entry.insert((i + 1, 0));
                order.push(doc_id);
            }
        }
        for (i, hit) in semantic_results.iter().enumerate() {
            match ranks.entry(hit.doc_id) {
                Entry::Occupied(mut entry) => {
                    let (_, semantic_rank) = entry.get_mut();
                    if *semantic_rank == 0 {
                        *semantic_rank = i + 1;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert((0, i + 1));
                    order.push(hit.doc_id);
                }
            }
        }

        let mut hits: Vec<RrfHit> = Vec::with_capacity(order.len());
        for doc_id in order {
            let Some(document) = self.index.document(doc_id) else {
                log::warn!("semantic provider returned unknown document id {doc_id}, skipping");
                continue;
            };
            let (bm25_rank, semantic_rank) = ranks[&doc_id];
            hits.push(RrfHit {
                doc_id,
                title: document.title.clone(),
                description: document.description.clone(),
                rrf_score: rrf_contribution(bm25_rank, k) + rrf_contribution(semantic_rank, k),
                bm25_rank,
                semantic_rank,
            });
        }

        hits.sort_by(|a, b| {
            b.rrf_score
                .partial_cmp(&a.rrf_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        Ok(hits)
    }

    /// Issue both rankers over the oversampled candidate window.
    fn retrieve(&self, query: &str, limit: usize) -> Result<(Vec<(u64, f64)>, Vec<SemanticHit>)> {
        let pool = limit.saturating_mul(CANDIDATE_OVERSAMPLE);
        let bm25_results = self.index.bm25_search(query, pool);
        let semantic_results = self.semantic.search(query, pool)?;
        Ok((bm25_results, semantic_results))
    }
}

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(XystonError::invalid_argument("limit must be positive"));
    }
    Ok(())
}

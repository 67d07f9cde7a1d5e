//! Result types for hybrid search.

use serde::{Deserialize, Serialize};

/// A single result from weighted hybrid search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridHit {
    /// Document id.
    pub doc_id: u64,
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// Combined score: `alpha * bm25 + (1 - alpha) * semantic`.
    pub hybrid_score: f64,
    /// Min-max-normalized BM25 score, 0.0 if not retrieved by BM25.
    pub bm25_score: f64,
    /// Min-max-normalized semantic score, 0.0 if not retrieved semantically.
    pub semantic_score: f64,
}

/// A single result from reciprocal-rank-fusion search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrfHit {
    /// Document id.
    pub doc_id: u64,
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// Sum of both rankers' reciprocal-rank contributions.
    pub rrf_score: f64,
    /// 1-based rank in the BM25 list, 0 if not retrieved by BM25.
    pub bm25_rank: usize,
    /// 1-based rank in the semantic list, 0 if not retrieved semantically.
    pub semantic_rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hybrid_hit_json_roundtrip() {
        let hit = HybridHit {
            doc_id: 3,
            title: "Space Love".to_string(),
            description: "Astronauts fall in love in space".to_string(),
            hybrid_score: 0.75,
            bm25_score: 1.0,
            semantic_score: 0.5,
        };
        let json = serde_json::to_string(&hit).unwrap();
        let parsed: HybridHit = serde_json::from_str(&json).unwrap();
        assert_eq!(hit, parsed);
    }

    #[test]
    fn test_rrf_hit_zero_rank_means_absent() {
        let hit = RrfHit {
            doc_id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            rrf_score: 1.0 / 61.0,
            bm25_rank: 1,
            semantic_rank: 0,
        };
        assert_eq!(hit.semantic_rank, 0);
    }
}

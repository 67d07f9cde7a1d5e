//! Rank-fusion math for combining two rankers' outputs.
//!
//! Pure functions only: min-max score normalization, weighted linear
//! combination, and reciprocal rank fusion (RRF). The hybrid searcher
//! composes these; nothing here touches an index or a provider.

/// Default RRF damping constant.
///
/// The conventional value of 60 flattens the influence of any single extreme
/// rank.
pub const DEFAULT_RRF_K: f64 = 60.0;

/// Rescale a score list linearly into `[0, 1]`.
///
/// Output has the same length and order as the input. A flat distribution
/// (max == min, including the single-element case) carries no ranking signal
/// and maps every element to 0.0. Empty input yields empty output.
pub fn min_max_normalize(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &score in scores {
        min = min.min(score);
        max = max.max(score);
    }

    let range = max - min;
    if range == 0.0 {
        return vec![0.0; scores.len()];
    }

    scores.iter().map(|&score| (score - min) / range).collect()
}

/// Weighted linear combination of a BM25 score and a semantic score.
///
/// `alpha` is the keyword weight: 1.0 is pure BM25, 0.0 is pure semantic.
/// Both inputs are expected to be min-max normalized so the weights compare
/// like with like.
pub fn hybrid_score(bm25_score: f64, semantic_score: f64, alpha: f64) -> f64 {
    alpha * bm25_score + (1.0 - alpha) * semantic_score
}

/// Reciprocal-rank contribution of a single ranker.
///
/// `rank` is 1-based; 0 means the document was not retrieved by this ranker
/// and contributes exactly 0.
pub fn rrf_contribution(rank: usize, k: f64) -> f64 {
    if rank > 0 {
        1.0 / (rank as f64 + k)
    } else {
        0.0
    }
}

/// Total RRF score of a document given its rank in each ranker's output.
///
/// Contributions are additive: a document retrieved by both rankers
/// accumulates both terms. Some RRF variants instead take only the better
/// rank (see DESIGN.md).
pub fn rrf_score(bm25_rank: usize, semantic_rank: usize, k: f64) -> f64 {
    rrf_contribution(bm25_rank, k) + rrf_contribution(semantic_rank, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_normalize_basic() {
        let normalized = min_max_normalize(&[2.0, 4.0, 6.0]);
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_min_max_normalize_preserves_order_and_length() {
        let normalized = min_max_normalize(&[5.0, 1.0, 3.0]);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0], 1.0);
        assert_eq!(normalized[1], 0.0);
        assert_eq!(normalized[2], 0.5);
    }

    #[test]
    fn test_min_max_normalize_single_element_is_zero() {
        assert_eq!(min_max_normalize(&[42.0]), vec![0.0]);
        assert_eq!(min_max_normalize(&[-3.5]), vec![0.0]);
    }

    #[test]
    fn test_min_max_normalize_flat_distribution_is_zero() {
        assert_eq!(min_max_normalize(&[7.0, 7.0, 7.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(min_max_normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_min_max_normalize_empty() {
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_hybrid_score_weights() {
        assert_eq!(hybrid_score(1.0, 0.0, 1.0), 1.0);
        assert_eq!(hybrid_score(1.0, 0.0, 0.0), 0.0);
        let mid = hybrid_score(0.8, 0.4, 0.5);
        assert!((mid - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rrf_contribution_formula() {
        assert_eq!(rrf_contribution(1, 60.0), 1.0 / 61.0);
        assert_eq!(rrf_contribution(3, 60.0), 1.0 / 63.0);
        assert_eq!(rrf_contribution(1, 1.0), 0.5);
    }

    #[test]
    fn test_rrf_contribution_zero_rank_means_absent() {
        assert_eq!(rrf_contribution(0, 60.0), 0.0);
        assert_eq!(rrf_contribution(0, 1.0), 0.0);
    }

    #[test]
    fn test_rrf_score_is_additive() {
        let both = rrf_score(1, 2, 60.0);
        assert_eq!(both, 1.0 / 61.0 + 1.0 / 62.0);

        let bm25_only = rrf_score(1, 0, 60.0);
        assert_eq!(bm25_only, 1.0 / 61.0);
    }
}

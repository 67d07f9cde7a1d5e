//! End-to-end hybrid search over a small movie corpus.

use std::io::Write;

use xyston::document::Document;
use xyston::hybrid::{HybridSearcher, PrecomputedSemanticSearch, SemanticHit, StaticSemanticSearch};
use xyston::index::InvertedIndex;

/// Doc 3 carries the fewest tokens, so with two "space" occurrences each,
/// length normalization ranks it above doc 1 for the query "space".
fn corpus() -> Vec<Document> {
    vec![
        Document::new(1, "Space Adventure", "A crew travels through deep space"),
        Document::new(2, "Love Story", "Two people fall in love in Paris"),
        Document::new(3, "Space Love", "Astronauts adore space"),
    ]
}

fn semantic_provider() -> Box<StaticSemanticSearch> {
    let mut provider = StaticSemanticSearch::new();
    provider.insert(
        "space",
        vec![
            SemanticHit { doc_id: 2, score: 0.95 },
            SemanticHit { doc_id: 3, score: 0.8 },
            SemanticHit { doc_id: 1, score: 0.7 },
        ],
    );
    Box::new(provider)
}

#[test]
fn bm25_ranking_reflects_length_normalization() {
    let mut index = InvertedIndex::new();
    index.build(&corpus());

    let results = index.bm25_search("space", 3);
    let ids: Vec<u64> = results.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(results[0].1 > results[1].1);
    assert_eq!(results[2].1, 0.0);
}

#[test]
fn idf_matches_formula_on_corpus() {
    let mut index = InvertedIndex::new();
    index.build(&corpus());

    // N = 3, "space" appears in docs 1 and 3.
    let idf = index.get_idf("space").unwrap();
    assert!((idf - (4.0f64 / 3.0).ln()).abs() < 1e-12);
}

#[test]
fn weighted_search_orders_shift_with_alpha() {
    let searcher = HybridSearcher::from_documents(&corpus(), semantic_provider());

    let ids = |hits: &[xyston::hybrid::HybridHit]| -> Vec<u64> {
        hits.iter().map(|h| h.doc_id).collect()
    };

    // Pure BM25 follows the keyword ranking.
    let hits = searcher.weighted_search("space", 1.0, 3).unwrap();
    assert_eq!(ids(&hits), vec![3, 1, 2]);

    // Pure semantic follows the provider's ranking.
    let hits = searcher.weighted_search("space", 0.0, 3).unwrap();
    assert_eq!(ids(&hits), vec![2, 3, 1]);

    // Balanced: doc 3 leads on BM25 and still scores well semantically,
    // doc 2 rides its semantic lead, doc 1 trails on both.
    let hits = searcher.weighted_search("space", 0.5, 3).unwrap();
    assert_eq!(ids(&hits), vec![3, 2, 1]);
    assert!((hits[0].hybrid_score - 0.7).abs() < 1e-9);
}

#[test]
fn rrf_search_fuses_both_rankings() {
    let searcher = HybridSearcher::from_documents(&corpus(), semantic_provider());

    // BM25 ranks [3, 1, 2], semantic ranks [2, 3, 1]. With k = 60 the fused
    // order is doc 3 (1/61 + 1/62), doc 2 (1/63 + 1/61), doc 1 (1/62 + 1/63).
    let hits = searcher.rrf_search("space", 60.0, 3).unwrap();
    let ids: Vec<u64> = hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    assert_eq!(hits[0].bm25_rank, 1);
    assert_eq!(hits[0].semantic_rank, 2);
    assert!((hits[0].rrf_score - (1.0 / 61.0 + 1.0 / 62.0)).abs() < 1e-12);
    assert!((hits[1].rrf_score - (1.0 / 63.0 + 1.0 / 61.0)).abs() < 1e-12);
    assert!((hits[2].rrf_score - (1.0 / 62.0 + 1.0 / 63.0)).abs() < 1e-12);
}

#[test]
fn precomputed_rankings_flow_through_weighted_search() {
    let mut rankings = tempfile::NamedTempFile::new().unwrap();
    write!(
        rankings,
        r#"{{"space": [{{"id": 2, "score": 0.95}}, {{"id": 3, "score": 0.8}}, {{"id": 1, "score": 0.7}}]}}"#
    )
    .unwrap();

    let provider = PrecomputedSemanticSearch::from_file(rankings.path()).unwrap();
    let searcher = HybridSearcher::from_documents(&corpus(), Box::new(provider));

    let file_backed = searcher.weighted_search("space", 0.5, 3).unwrap();
    let in_memory = HybridSearcher::from_documents(&corpus(), semantic_provider())
        .weighted_search("space", 0.5, 3)
        .unwrap();
    assert_eq!(file_backed, in_memory);
}

#[test]
fn unranked_query_degrades_to_bm25_alone() {
    let searcher = HybridSearcher::from_documents(&corpus(), semantic_provider());

    // The provider has no ranking for this query; every semantic score is 0
    // and the fused order matches BM25's.
    let hits = searcher.weighted_search("crew", 0.5, 3).unwrap();
    assert!(hits.iter().all(|h| h.semantic_score == 0.0));
    assert_eq!(hits[0].doc_id, 1);
}

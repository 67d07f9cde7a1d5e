//! Command execution logic for the Xyston CLI.

use std::path::Path;

use crate::cli::args::{
    Bm25TfArgs, BuildArgs, Command, NormalizeArgs, RrfSearchArgs, SearchArgs, TermArgs,
    TermDocArgs, WeightedSearchArgs, XystonArgs,
};
use crate::cli::output::{
    output_result, Bm25IdfResult, Bm25TfResult, BuildResult, IdfResult, NormalizeResult,
    RrfSearchResults, SearchHit, SearchResults, TermFrequencyResult, TfIdfResult,
    WeightedSearchResults,
};
use crate::document::load_documents;
use crate::error::Result;
use crate::fusion::min_max_normalize;
use crate::hybrid::{HybridSearcher, PrecomputedSemanticSearch};
use crate::index::{Bm25Params, InvertedIndex};
use crate::storage::{FileStorage, Storage};

/// Execute the given command.
pub fn execute_command(args: XystonArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => execute_build(build_args, &args),
        Command::Search(search_args) => execute_search(search_args, &args),
        Command::Tf(tf_args) => execute_tf(tf_args, &args),
        Command::Idf(idf_args) => execute_idf(idf_args, &args),
        Command::Bm25Idf(idf_args) => execute_bm25_idf(idf_args, &args),
        Command::Bm25Tf(tf_args) => execute_bm25_tf(tf_args, &args),
        Command::Tfidf(tfidf_args) => execute_tfidf(tfidf_args, &args),
        Command::Normalize(normalize_args) => execute_normalize(normalize_args, &args),
        Command::WeightedSearch(search_args) => execute_weighted_search(search_args, &args),
        Command::RrfSearch(search_args) => execute_rrf_search(search_args, &args),
    }
}

/// Open the snapshot directory and load the cached index from it.
fn load_index(cache_dir: &Path) -> Result<InvertedIndex> {
    let storage = FileStorage::new(cache_dir)?;
    InvertedIndex::load(&storage)
}

fn execute_build(build_args: &BuildArgs, args: &XystonArgs) -> Result<()> {
    let documents = load_documents(&build_args.corpus)?;
    log::info!(
        "building index from {} ({} documents)",
        build_args.corpus.display(),
        documents.len()
    );

    let storage = FileStorage::new(&build_args.cache_dir)?;
    let replaced_existing = InvertedIndex::is_cached(&storage);

    let mut index = InvertedIndex::new();
    index.build(&documents);
    index.save(&storage)?;

    let result = BuildResult {
        documents_indexed: index.doc_count(),
        distinct_cache_blobs: storage.list_blobs()?.len(),
        cache_dir: build_args.cache_dir.display().to_string(),
        replaced_existing,
    };
    output_result("Index built", &result, args)
}

fn execute_search(search_args: &SearchArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&search_args.cache_dir)?;
    let scored = index.bm25_search(&search_args.query, search_args.limit);

    let hits = scored
        .into_iter()
        .map(|(doc_id, score)| SearchHit {
            doc_id,
            title: index
                .document(doc_id)
                .map(|d| d.title.clone())
                .unwrap_or_default(),
            score,
        })
        .collect();

    let results = SearchResults {
        query: search_args.query.clone(),
        hits,
    };
    output_result("Search results", &results, args)
}

fn execute_tf(tf_args: &TermDocArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&tf_args.cache_dir)?;
    let term_frequency = index.get_term_frequency(tf_args.doc_id, &tf_args.term)?;

    let result = TermFrequencyResult {
        doc_id: tf_args.doc_id,
        term: tf_args.term.clone(),
        term_frequency,
    };
    output_result("Term frequency", &result, args)
}

fn execute_idf(idf_args: &TermArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&idf_args.cache_dir)?;
    let idf = index.get_idf(&idf_args.term)?;

    let result = IdfResult {
        term: idf_args.term.clone(),
        idf,
    };
    output_result("Inverse document frequency", &result, args)
}

fn execute_bm25_idf(idf_args: &TermArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&idf_args.cache_dir)?;
    let bm25_idf = index.get_bm25_idf(&idf_args.term)?;

    let result = Bm25IdfResult {
        term: idf_args.term.clone(),
        bm25_idf,
    };
    output_result("BM25 inverse document frequency", &result, args)
}

fn execute_bm25_tf(tf_args: &Bm25TfArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&tf_args.cache_dir)?;

    let defaults = Bm25Params::default();
    let params = Bm25Params {
        k1: tf_args.k1.unwrap_or(defaults.k1),
        b: tf_args.b.unwrap_or(defaults.b),
    };
    let bm25_tf = index.get_bm25_term_frequency(tf_args.doc_id, &tf_args.term, &params)?;

    let result = Bm25TfResult {
        doc_id: tf_args.doc_id,
        term: tf_args.term.clone(),
        k1: params.k1,
        b: params.b,
        bm25_tf,
    };
    output_result("BM25 term frequency", &result, args)
}

fn execute_tfidf(tfidf_args: &TermDocArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&tfidf_args.cache_dir)?;
    let tf = index.get_term_frequency(tfidf_args.doc_id, &tfidf_args.term)? as f64;
    let idf = index.get_idf(&tfidf_args.term)?;

    let result = TfIdfResult {
        doc_id: tfidf_args.doc_id,
        term: tfidf_args.term.clone(),
        tf_idf: tf * idf,
    };
    output_result("TF-IDF", &result, args)
}

fn execute_normalize(normalize_args: &NormalizeArgs, args: &XystonArgs) -> Result<()> {
    let result = NormalizeResult {
        scores: min_max_normalize(&normalize_args.scores),
    };
    output_result("Normalized scores", &result, args)
}

fn execute_weighted_search(search_args: &WeightedSearchArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&search_args.cache_dir)?;
    let semantic = PrecomputedSemanticSearch::from_file(&search_args.semantic_rankings)?;
    let searcher = HybridSearcher::new(index, Box::new(semantic));

    let hits = searcher.weighted_search(&search_args.query, search_args.alpha, search_args.limit)?;

    let results = WeightedSearchResults {
        query: search_args.query.clone(),
        alpha: search_args.alpha,
        hits,
    };
    output_result("Weighted search results", &results, args)
}

fn execute_rrf_search(search_args: &RrfSearchArgs, args: &XystonArgs) -> Result<()> {
    let index = load_index(&search_args.cache_dir)?;
    let semantic = PrecomputedSemanticSearch::from_file(&search_args.semantic_rankings)?;
    let searcher = HybridSearcher::new(index, Box::new(semantic));

    let hits = searcher.rrf_search(&search_args.query, search_args.k, search_args.limit)?;

    let results = RrfSearchResults {
        query: search_args.query.clone(),
        k: search_args.k,
        hits,
    };
    output_result("RRF search results", &results, args)
}

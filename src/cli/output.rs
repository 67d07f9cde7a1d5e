//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, XystonArgs};
use crate::error::Result;
use crate::hybrid::{HybridHit, RrfHit};

/// Result structure for index builds.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub documents_indexed: usize,
    pub distinct_cache_blobs: usize,
    pub cache_dir: String,
    pub replaced_existing: bool,
}

/// Result structure for a term-frequency lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermFrequencyResult {
    pub doc_id: u64,
    pub term: String,
    pub term_frequency: u64,
}

/// Result structure for an IDF lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdfResult {
    pub term: String,
    pub idf: f64,
}

/// Result structure for a BM25 IDF lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Bm25IdfResult {
    pub term: String,
    pub bm25_idf: f64,
}

/// Result structure for a saturated BM25 term-frequency lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct Bm25TfResult {
    pub doc_id: u64,
    pub term: String,
    pub k1: f64,
    pub b: f64,
    pub bm25_tf: f64,
}

/// Result structure for a TF-IDF lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct TfIdfResult {
    pub doc_id: u64,
    pub term: String,
    pub tf_idf: f64,
}

/// Result structure for score normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub scores: Vec<f64>,
}

/// A single BM25 search hit with its document resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: u64,
    pub title: String,
    pub score: f64,
}

/// Result structure for BM25 search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// Result structure for weighted hybrid search.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeightedSearchResults {
    pub query: String,
    pub alpha: f64,
    pub hits: Vec<HybridHit>,
}

/// Result structure for RRF hybrid search.
#[derive(Debug, Serialize, Deserialize)]
pub struct RrfSearchResults {
    pub query: String,
    pub k: f64,
    pub hits: Vec<RrfHit>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &XystonArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &XystonArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &XystonArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
    }

    // Convert to JSON value for easier manipulation.
    let value = serde_json::to_value(result)?;

    if let Some(hits) = value.as_object().and_then(|obj| obj.get("hits")) {
        output_hits_human(hits)
    } else {
        output_generic_human(&value)
    }
}

/// Print a ranked hit list the way the interactive commands expect it.
fn output_hits_human(hits: &serde_json::Value) -> Result<()> {
    let Some(hits) = hits.as_array() else {
        return Ok(());
    };
    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        let title = hit.get("title").and_then(|t| t.as_str()).unwrap_or("");
        let doc_id = hit.get("doc_id").and_then(|d| d.as_u64()).unwrap_or(0);
        println!("{}. ({doc_id}) {title}", i + 1);

        for (key, label) in [
            ("score", "Score"),
            ("hybrid_score", "Hybrid Score"),
            ("bm25_score", "BM25 Score"),
            ("semantic_score", "Semantic Score"),
            ("rrf_score", "RRF Score"),
        ] {
            if let Some(score) = hit.get(key).and_then(|s| s.as_f64()) {
                println!("   {label}: {score:.4}");
            }
        }
        for (key, label) in [("bm25_rank", "BM25 Rank"), ("semantic_rank", "Semantic Rank")] {
            if let Some(rank) = hit.get(key).and_then(|r| r.as_u64()) {
                println!("   {label}: {rank}");
            }
        }
        if let Some(description) = hit.get("description").and_then(|d| d.as_str()) {
            println!("   {}", truncate(description, 80));
        }
    }
    Ok(())
}

/// Generic key/value printing for scalar results.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value.as_object() {
        Some(obj) => {
            for (key, val) in obj {
                match val.as_f64() {
                    Some(f) if val.is_f64() => println!("{key}: {f:.4}"),
                    _ => println!("{key}: {val}"),
                }
            }
        }
        None => println!("{value}"),
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{prefix}...")
    }
}

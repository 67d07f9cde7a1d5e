//! Command line argument parsing for the Xyston CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Xyston - a hybrid document retrieval engine
#[derive(Parser, Debug, Clone)]
#[command(name = "xyston")]
#[command(about = "A hybrid document retrieval engine combining BM25 and semantic ranking")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct XystonArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl XystonArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the inverted index from a corpus file and cache it
    Build(BuildArgs),

    /// Search the cached index using BM25
    Search(SearchArgs),

    /// Get a term's frequency in a document
    Tf(TermDocArgs),

    /// Get a term's inverse document frequency
    Idf(TermArgs),

    /// Get a term's BM25 inverse document frequency
    #[command(name = "bm25-idf")]
    Bm25Idf(TermArgs),

    /// Get a term's saturated BM25 term frequency in a document
    #[command(name = "bm25-tf")]
    Bm25Tf(Bm25TfArgs),

    /// Get a term's TF-IDF score in a document
    Tfidf(TermDocArgs),

    /// Min-max normalize a list of scores
    Normalize(NormalizeArgs),

    /// Weighted hybrid search (BM25 + semantic)
    #[command(name = "weighted-search")]
    WeightedSearch(WeightedSearchArgs),

    /// Reciprocal-rank-fusion hybrid search
    #[command(name = "rrf-search")]
    RrfSearch(RrfSearchArgs),
}

/// Arguments for building the index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Corpus JSON file (array of documents or {"documents": [...]})
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for BM25 search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of results to return
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for term-level lookups
#[derive(Parser, Debug, Clone)]
pub struct TermArgs {
    /// Term to look up (must normalize to a single token)
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for per-document term lookups
#[derive(Parser, Debug, Clone)]
pub struct TermDocArgs {
    /// Document id
    #[arg(value_name = "DOC_ID")]
    pub doc_id: u64,

    /// Term to look up (must normalize to a single token)
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for the saturated BM25 term-frequency lookup
#[derive(Parser, Debug, Clone)]
pub struct Bm25TfArgs {
    /// Document id
    #[arg(value_name = "DOC_ID")]
    pub doc_id: u64,

    /// Term to look up (must normalize to a single token)
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Tunable BM25 k1 parameter
    #[arg(value_name = "K1")]
    pub k1: Option<f64>,

    /// Tunable BM25 b parameter
    #[arg(value_name = "B")]
    pub b: Option<f64>,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for score normalization
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Scores to normalize
    #[arg(value_name = "SCORES", num_args = 1.., allow_negative_numbers = true)]
    pub scores: Vec<f64>,
}

/// Arguments for weighted hybrid search
#[derive(Parser, Debug, Clone)]
pub struct WeightedSearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Keyword weight in [0, 1]: 1 is pure BM25, 0 is pure semantic
    #[arg(short, long, default_value = "0.5")]
    pub alpha: f64,

    /// Number of results to return
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// JSON file of precomputed semantic rankings
    #[arg(short, long, value_name = "RANKINGS_FILE")]
    pub semantic_rankings: PathBuf,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

/// Arguments for RRF hybrid search
#[derive(Parser, Debug, Clone)]
pub struct RrfSearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// RRF damping constant
    #[arg(short, default_value = "60")]
    pub k: f64,

    /// Number of results to return
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// JSON file of precomputed semantic rankings
    #[arg(short, long, value_name = "RANKINGS_FILE")]
    pub semantic_rankings: PathBuf,

    /// Directory holding the index snapshot
    #[arg(short, long, default_value = "cache")]
    pub cache_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_command() {
        let args = XystonArgs::parse_from(["xyston", "build", "movies.json"]);
        match args.command {
            Command::Build(build) => {
                assert_eq!(build.corpus, PathBuf::from("movies.json"));
                assert_eq!(build.cache_dir, PathBuf::from("cache"));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_weighted_search_defaults() {
        let args = XystonArgs::parse_from([
            "xyston",
            "weighted-search",
            "space movie",
            "--semantic-rankings",
            "rankings.json",
        ]);
        match args.command {
            Command::WeightedSearch(search) => {
                assert_eq!(search.query, "space movie");
                assert_eq!(search.alpha, 0.5);
                assert_eq!(search.limit, 5);
            }
            _ => panic!("expected weighted-search command"),
        }
    }

    #[test]
    fn test_parse_rrf_search_k() {
        let args = XystonArgs::parse_from([
            "xyston",
            "rrf-search",
            "space",
            "-k",
            "10",
            "--semantic-rankings",
            "rankings.json",
        ]);
        match args.command {
            Command::RrfSearch(search) => {
                assert_eq!(search.k, 10.0);
            }
            _ => panic!("expected rrf-search command"),
        }
    }

    #[test]
    fn test_parse_normalize_scores() {
        let args = XystonArgs::parse_from(["xyston", "normalize", "1.5", "-2", "3"]);
        match args.command {
            Command::Normalize(normalize) => {
                assert_eq!(normalize.scores, vec![1.5, -2.0, 3.0]);
            }
            _ => panic!("expected normalize command"),
        }
    }

    #[test]
    fn test_verbosity_quiet_wins() {
        let args = XystonArgs::parse_from(["xyston", "-q", "-vvv", "normalize", "1"]);
        assert_eq!(args.verbosity(), 0);

        let args = XystonArgs::parse_from(["xyston", "normalize", "1"]);
        assert_eq!(args.verbosity(), 1);
    }
}

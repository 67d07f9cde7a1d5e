//! # Xyston
//!
//! A small hybrid document-retrieval engine: BM25 over an inverted index,
//! combined with an injected semantic-search provider through min-max score
//! fusion or reciprocal rank fusion.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Inverted index with BM25 term statistics
//! - Weighted (linear) and reciprocal-rank hybrid fusion
//! - Pluggable snapshot storage backends
//! - Pluggable semantic-search providers

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod fusion;
pub mod hybrid;
pub mod index;
pub mod storage;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

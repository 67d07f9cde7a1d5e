//! Hybrid search: BM25 plus an injected semantic-search provider.
//!
//! The [`searcher::HybridSearcher`] issues both rankers independently over an
//! oversampled candidate window and fuses the two rankings, either by
//! weighted linear combination of min-max-normalized scores or by reciprocal
//! rank fusion.

pub mod searcher;
pub mod semantic;
pub mod types;

pub use searcher::HybridSearcher;
pub use semantic::{PrecomputedSemanticSearch, SemanticHit, SemanticSearch, StaticSemanticSearch};
pub use types::{HybridHit, RrfHit};

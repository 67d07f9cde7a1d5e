//! Inverted index with BM25 term statistics.
//!
//! The index maps tokens to postings, keeps per-document term counts and
//! lengths, and scores documents with the BM25 formula. It is built once from
//! the full corpus, optionally persisted as a snapshot, and read-only at
//! query time: the search path mutates no shared state, so concurrent queries
//! against a built index are safe.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::{normalize, normalize_term};
use crate::document::Document;
use crate::error::{Result, XystonError};
use crate::storage::Storage;

/// Snapshot blob holding the token -> postings map.
pub const POSTINGS_BLOB: &str = "postings";
/// Snapshot blob holding the documents in build order.
pub const DOCUMENTS_BLOB: &str = "documents";
/// Snapshot blob holding per-document term frequencies.
pub const TERM_FREQUENCY_BLOB: &str = "term_frequency";
/// Snapshot blob holding per-document token counts.
pub const DOC_LENGTHS_BLOB: &str = "doc_lengths";

const SNAPSHOT_BLOBS: [&str; 4] = [
    POSTINGS_BLOB,
    DOCUMENTS_BLOB,
    TERM_FREQUENCY_BLOB,
    DOC_LENGTHS_BLOB,
];

/// Tunable BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document-length normalization strength.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.5, b: 0.75 }
    }
}

/// An inverted index over a fixed corpus.
///
/// Built in one batch from the full document collection; there is no
/// incremental add, update, or delete. A document id appears in the document
/// map, the length table, and the term-frequency table together or not at
/// all, and every id in a posting list exists in the document map.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// Token -> document ids, one entry per term occurrence, in insertion
    /// order. Deduplication happens at query time.
    postings: HashMap<String, Vec<u64>>,
    /// Document id -> full document.
    docmap: HashMap<u64, Document>,
    /// Document ids in the order they were added.
    doc_order: Vec<u64>,
    /// Document id -> token -> occurrence count.
    term_frequency: HashMap<u64, HashMap<String, u64>>,
    /// Document id -> total token count.
    doc_lengths: HashMap<u64, u64>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Build the index from the corpus, in the order given.
    ///
    /// If the same document id occurs twice, the later occurrence's
    /// term-frequency and length entries replace the earlier one's.
    pub fn build(&mut self, documents: &[Document]) {
        for document in documents {
            self.add_document(document);
        }
        log::info!(
            "built index: {} documents, {} distinct tokens",
            self.doc_count(),
            self.postings.len()
        );
    }

    fn add_document(&mut self, document: &Document) {
        let doc_id = document.id;
        let tokens = normalize(&document.searchable_text());

        self.doc_lengths.insert(doc_id, tokens.len() as u64);

        let mut counts: HashMap<String, u64> = HashMap::new();
        for token in tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
            self.postings.entry(token).or_default().push(doc_id);
        }
        self.term_frequency.insert(doc_id, counts);

        if self.docmap.insert(doc_id, document.clone()).is_none() {
            self.doc_order.push(doc_id);
        }
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> usize {
        self.docmap.len()
    }

    /// Mean token count across indexed documents, 0.0 for an empty index.
    pub fn avg_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        let total: u64 = self.doc_lengths.values().sum();
        total as f64 / self.doc_lengths.len() as f64
    }

    /// Look up a document by id.
    pub fn document(&self, doc_id: u64) -> Option<&Document> {
        self.docmap.get(&doc_id)
    }

    /// Token count of a document, 0 if unknown.
    pub fn doc_length(&self, doc_id: u64) -> u64 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    /// The deduplicated, ascending-sorted ids of documents containing `term`.
    ///
    /// The term is lower-cased (not fully tokenized) before lookup; unknown
    /// terms yield an empty list.
    pub fn get_documents(&self, term: &str) -> Vec<u64> {
        let term = term.to_lowercase();
        let Some(postings) = self.postings.get(&term) else {
            return Vec::new();
        };
        let unique: BTreeSet<u64> = postings.iter().copied().collect();
        unique.into_iter().collect()
    }

    /// Occurrence count of `term` in the given document.
    ///
    /// Fails with an invalid-argument error unless the term normalizes to
    /// exactly one token; absent documents or tokens count 0.
    pub fn get_term_frequency(&self, doc_id: u64, term: &str) -> Result<u64> {
        let token = normalize_term(term)?;
        Ok(self.token_frequency(doc_id, &token))
    }

    /// Saturated BM25 term frequency with document-length normalization.
    pub fn get_bm25_term_frequency(
        &self,
        doc_id: u64,
        term: &str,
        params: &Bm25Params,
    ) -> Result<f64> {
        let token = normalize_term(term)?;
        Ok(self.saturated_tf(doc_id, &token, params))
    }

    /// Plain inverse document frequency: `ln((N + 1) / (df + 1))`.
    pub fn get_idf(&self, term: &str) -> Result<f64> {
        let token = normalize_term(term)?;
        let n = self.doc_count() as f64;
        let df = self.token_doc_frequency(&token) as f64;
        Ok(((n + 1.0) / (df + 1.0)).ln())
    }

    /// BM25 inverse document frequency:
    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`.
    ///
    /// Negative for terms appearing in more than half the corpus; that is
    /// part of the standard formula, not an error.
    pub fn get_bm25_idf(&self, term: &str) -> Result<f64> {
        let token = normalize_term(term)?;
        Ok(self.bm25_idf(&token))
    }

    /// Full BM25 score of a single term for a document: saturated term
    /// frequency times BM25 IDF.
    pub fn bm25_term_score(&self, doc_id: u64, term: &str, params: &Bm25Params) -> Result<f64> {
        let token = normalize_term(term)?;
        Ok(self.saturated_tf(doc_id, &token, params) * self.bm25_idf(&token))
    }

    /// Score every indexed document against the query and return the top
    /// `limit` as `(doc_id, score)`, best first.
    ///
    /// The query is fully tokenized; each document's score is the sum of its
    /// per-token BM25 scores. Tokens absent from the index contribute 0
    /// through the standard formulas. The sort is stable: ties keep the
    /// original document order. Brute force over the corpus by design; the
    /// target corpus is small.
    pub fn bm25_search(&self, query: &str, limit: usize) -> Vec<(u64, f64)> {
        let tokens = normalize(query);
        let params = Bm25Params::default();

        let mut scored: Vec<(u64, f64)> = self
            .doc_order
            .iter()
            .map(|&doc_id| {
                let score: f64 = tokens
                    .iter()
                    .map(|token| self.saturated_tf(doc_id, token, &params) * self.bm25_idf(token))
                    .sum();
                (doc_id, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }

    /// Persist the index as one snapshot: four named blobs written together.
    pub fn save(&self, storage: &dyn Storage) -> Result<()> {
        let ordered_documents: Vec<&Document> = self
            .doc_order
            .iter()
            .filter_map(|id| self.docmap.get(id))
            .collect();

        write_bincode(storage, POSTINGS_BLOB, &self.postings)?;
        write_bincode(storage, DOCUMENTS_BLOB, &ordered_documents)?;
        write_bincode(storage, TERM_FREQUENCY_BLOB, &self.term_frequency)?;
        write_bincode(storage, DOC_LENGTHS_BLOB, &self.doc_lengths)?;

        log::info!("saved index snapshot: {} documents", self.doc_count());
        Ok(())
    }

    /// Restore an index from a snapshot, fully replacing in-memory state.
    ///
    /// Fails with a not-found error if any snapshot blob is missing.
    pub fn load(storage: &dyn Storage) -> Result<Self> {
        let postings: HashMap<String, Vec<u64>> = read_bincode(storage, POSTINGS_BLOB)?;
        let documents: Vec<Document> = read_bincode(storage, DOCUMENTS_BLOB)?;
        let term_frequency: HashMap<u64, HashMap<String, u64>> =
            read_bincode(storage, TERM_FREQUENCY_BLOB)?;
        let doc_lengths: HashMap<u64, u64> = read_bincode(storage, DOC_LENGTHS_BLOB)?;

        let doc_order: Vec<u64> = documents.iter().map(|d| d.id).collect();
        let docmap: HashMap<u64, Document> =
            documents.into_iter().map(|d| (d.id, d)).collect();

        log::info!("loaded index snapshot: {} documents", docmap.len());

        Ok(InvertedIndex {
            postings,
            docmap,
            doc_order,
            term_frequency,
            doc_lengths,
        })
    }

    /// Whether a complete snapshot exists in the given storage.
    pub fn is_cached(storage: &dyn Storage) -> bool {
        SNAPSHOT_BLOBS.iter().all(|name| storage.blob_exists(name))
    }

    fn token_frequency(&self, doc_id: u64, token: &str) -> u64 {
        self.term_frequency
            .get(&doc_id)
            .and_then(|counts| counts.get(token))
            .copied()
            .unwrap_or(0)
    }

    fn token_doc_frequency(&self, token: &str) -> usize {
        match self.postings.get(token) {
            Some(postings) => postings.iter().collect::<HashSet<_>>().len(),
            None => 0,
        }
    }

    fn bm25_idf(&self, token: &str) -> f64 {
        let n = self.doc_count() as f64;
        let df = self.token_doc_frequency(token) as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    fn saturated_tf(&self, doc_id: u64, token: &str, params: &Bm25Params) -> f64 {
        let tf = self.token_frequency(doc_id, token) as f64;
        let avg_len = self.avg_doc_length();
        // With zero documents indexed the length ratio is defined as 0.
        let length_ratio = if avg_len > 0.0 {
            self.doc_length(doc_id) as f64 / avg_len
        } else {
            0.0
        };
        let length_norm = (1.0 - params.b) + params.b * length_ratio;

        let denominator = tf + params.k1 * length_norm;
        if denominator == 0.0 {
            return 0.0;
        }
        (tf * (params.k1 + 1.0)) / denominator
    }
}

fn write_bincode<T: Serialize>(storage: &dyn Storage, name: &str, value: &T) -> Result<()> {
    let data =
        bincode::serialize(value).map_err(|e| XystonError::serialization(e.to_string()))?;
    storage.write_blob(name, &data)
}

fn read_bincode<T: for<'de> Deserialize<'de>>(storage: &dyn Storage, name: &str) -> Result<T> {
    let data = storage.read_blob(name)?;
    bincode::deserialize(&data).map_err(|e| XystonError::serialization(e.to_string()))
}

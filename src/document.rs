//! Document model for the retrieval engine.
//!
//! A [`Document`] is the unit of retrieval: a stable caller-assigned id plus
//! a title and a description. The engine treats the searchable text of a
//! document as `title + " " + description`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A document in the corpus.
///
/// Ids are assigned by the caller and must be stable and unique; the engine
/// never generates ids of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable, caller-assigned document id.
    pub id: u64,
    /// Document title.
    pub title: String,
    /// Document description (body text).
    pub description: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(id: u64, title: S, description: S) -> Self {
        Document {
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// The text the engine indexes for this document.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A corpus file: either a bare JSON array of documents or an object with a
/// `documents` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Wrapped { documents: Vec<Document> },
    Bare(Vec<Document>),
}

/// Load a corpus from a JSON file.
///
/// Accepts either `[{...}, ...]` or `{"documents": [{...}, ...]}`.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let corpus: CorpusFile = serde_json::from_reader(reader)?;
    let documents = match corpus {
        CorpusFile::Wrapped { documents } => documents,
        CorpusFile::Bare(documents) => documents,
    };
    Ok(documents)
}

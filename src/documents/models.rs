// src/documents/models.rs
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// A document shown by the reader. Only `content` feeds figure extraction;
/// the rest is metadata for listings and citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub doc_type: String, // e.g., "Journal Article", "Notebook Extract"
    pub source: String,   // Journal, conference or notebook name
    pub date: String,     // ISO date, e.g. "2023-10-15"
    pub content: Arc<str>, // Shared with the figure cache, never copied per lookup
}

impl Document {
    /// Whether this document came from the notebook import flow.
    pub fn is_notebook_extract(&self) -> bool {
        self.doc_type == "Notebook Extract"
    }
}

// src/documents/library.rs
use std::fs;
use std::path::Path;
use crate::documents::models::Document;
use crate::utils::error::DocumentError;

// --- Embedded Data ---
const BUILTIN_DOCUMENTS: &str = include_str!("../../data/documents.json");
const IMPORTED_DOCUMENTS: &str = include_str!("../../data/imported.json");

/// Ordered collection of documents available to the reader.
#[derive(Debug, Clone, Default)]
pub struct DocumentLibrary {
    documents: Vec<Document>,
}

impl DocumentLibrary {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The sample documents shipped with the binary.
    pub fn builtin() -> Result<Self, DocumentError> {
        Self::from_json(BUILTIN_DOCUMENTS)
    }

    /// Parses a JSON array of documents.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        tracing::debug!("Parsed document library with {} documents", documents.len());
        Ok(Self::new(documents))
    }

    /// Loads a library from a JSON file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        tracing::info!("Loading document library from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Like [`get`](Self::get) but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> Result<&Document, DocumentError> {
        self.get(id).ok_or_else(|| DocumentError::NotFound(id.to_string()))
    }

    /// Appends documents, keeping existing order.
    pub fn merge(&mut self, documents: Vec<Document>) {
        self.documents.extend(documents);
    }

    pub fn first(&self) -> Option<&Document> {
        self.documents.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Canned documents produced by the simulated notebook import.
pub fn imported_documents() -> Result<Vec<Document>, DocumentError> {
    Ok(serde_json::from_str(IMPORTED_DOCUMENTS)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract_figures;

    #[test]
    fn test_builtin_library_parses() {
        let library = DocumentLibrary::builtin().expect("embedded library should parse");
        assert_eq!(library.len(), 6);
        assert_eq!(library.first().map(|d| d.id.as_str()), Some("doc-1"));
        assert_eq!(library.require("doc-2").map(|d| d.author.as_str()).ok(), Some("Prof. Marcus Thorne"));
        assert!(matches!(library.require("missing"), Err(DocumentError::NotFound(_))));
    }

    #[test]
    fn test_builtin_figures() {
        let library = DocumentLibrary::builtin().expect("embedded library should parse");

        let doc1 = extract_figures(&library.require("doc-1").unwrap().content);
        let pages: Vec<(&str, usize)> = doc1.iter().map(|f| (f.label.as_str(), f.page)).collect();
        assert_eq!(pages, vec![("Figure 1", 3), ("Figure 2", 4)]);

        // "Figure 3 plots" has no lead-in verb; the second reference in a paragraph is ignored
        let doc4 = extract_figures(&library.require("doc-4").unwrap().content);
        let labels: Vec<&str> = doc4.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Figure 1", "Figure 4"]);

        // "(Figure 1)" is a parenthetical, not a reference
        let doc5 = extract_figures(&library.require("doc-5").unwrap().content);
        assert_eq!(doc5.len(), 1);
        assert_eq!(doc5[0].label, "Figure 2");

        assert!(extract_figures(&library.require("doc-3").unwrap().content).is_empty());
    }

    #[test]
    fn test_imported_documents_and_merge() {
        let imported = imported_documents().expect("embedded imports should parse");
        assert_eq!(imported.len(), 2);
        assert!(imported.iter().all(Document::is_notebook_extract));

        let mut library = DocumentLibrary::builtin().unwrap();
        library.merge(imported);
        assert_eq!(library.len(), 8);
        assert_eq!(library.iter().last().map(|d| d.id.as_str()), Some("nb-2"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(DocumentLibrary::from_json("{not json"), Err(DocumentError::Parse(_))));
    }
}

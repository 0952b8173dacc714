// src/session/mod.rs
use std::collections::HashMap;
use std::sync::Arc;
use crate::documents::{Document, DocumentLibrary};
use crate::extractors::{ExtractedFigure, FigureExtractor};

/// Memoizes the figures of the most recently seen content (cache of size one).
#[derive(Debug, Default)]
pub struct FigureCache {
    extractor: FigureExtractor,
    entry: Option<(Arc<str>, Arc<[ExtractedFigure]>)>,
}

impl FigureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached figures when `content` is the cached content
    /// (same allocation or equal text); otherwise recomputes and replaces the entry.
    pub fn get_or_extract(&mut self, content: &Arc<str>) -> Arc<[ExtractedFigure]> {
        if let Some((cached, figures)) = &self.entry {
            if Arc::ptr_eq(cached, content) || **cached == **content {
                tracing::trace!("Figure cache hit ({} figures)", figures.len());
                return Arc::clone(figures);
            }
        }

        let figures: Arc<[ExtractedFigure]> = self.extractor.extract(content).into();
        tracing::debug!("Figure cache miss, extracted {} figures", figures.len());
        self.entry = Some((Arc::clone(content), Arc::clone(&figures)));
        figures
    }
}

/// In-memory reader state: the library, the active document, per-document notes
/// and the figures of the active document.
#[derive(Debug)]
pub struct ReaderSession {
    library: DocumentLibrary,
    active_id: Option<String>,
    notes: HashMap<String, String>,
    figure_cache: FigureCache,
}

impl ReaderSession {
    pub fn new(library: DocumentLibrary) -> Self {
        let active_id = library.first().map(|doc| doc.id.clone());
        Self {
            library,
            active_id,
            notes: HashMap::new(),
            figure_cache: FigureCache::new(),
        }
    }

    pub fn library(&self) -> &DocumentLibrary {
        &self.library
    }

    /// Switches the active document. Returns false (and keeps the current
    /// selection) when the id is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        if self.library.get(id).is_none() {
            tracing::warn!("Cannot select unknown document '{}'", id);
            return false;
        }
        tracing::info!("Active document: {}", id);
        self.active_id = Some(id.to_string());
        true
    }

    /// The active document; unknown or missing selections fall back to the first document.
    pub fn active_document(&self) -> Option<&Document> {
        self.active_id
            .as_deref()
            .and_then(|id| self.library.get(id))
            .or_else(|| self.library.first())
    }

    /// Figures of the active document, recomputed only when its content changes.
    pub fn figures(&mut self) -> Arc<[ExtractedFigure]> {
        let content = self.active_document().map(|doc| Arc::clone(&doc.content));
        match content {
            Some(content) => self.figure_cache.get_or_extract(&content),
            None => Arc::from(Vec::new()),
        }
    }

    pub fn notes(&self) -> &str {
        self.active_document()
            .and_then(|doc| self.notes.get(&doc.id))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_notes(&mut self, text: impl Into<String>) {
        if let Some(id) = self.active_document().map(|doc| doc.id.clone()) {
            self.notes.insert(id, text.into());
        }
    }

    /// Adds imported documents and activates the first of them.
    pub fn import_documents(&mut self, documents: Vec<Document>) {
        let first_id = documents.first().map(|doc| doc.id.clone());
        tracing::info!("Merged {} imported documents", documents.len());
        self.library.merge(documents);
        if let Some(id) = first_id {
            self.select(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::library::imported_documents;

    fn session() -> ReaderSession {
        ReaderSession::new(DocumentLibrary::builtin().expect("embedded library should parse"))
    }

    #[test]
    fn test_cache_reuses_result_for_same_content() {
        let mut cache = FigureCache::new();
        let content: Arc<str> = Arc::from("Figure 1: A cached caption.");
        let first = cache.get_or_extract(&content);
        let second = cache.get_or_extract(&content);
        assert!(Arc::ptr_eq(&first, &second));

        // Equal text in a different allocation is the same content
        let copy: Arc<str> = Arc::from("Figure 1: A cached caption.");
        assert!(Arc::ptr_eq(&first, &cache.get_or_extract(&copy)));

        let other: Arc<str> = Arc::from("Figure 2: Something else entirely.");
        let third = cache.get_or_extract(&other);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third[0].label, "Figure 2");
    }

    #[test]
    fn test_selection_drives_figures() {
        let mut session = session();
        assert_eq!(session.active_document().map(|d| d.id.as_str()), Some("doc-1"));
        assert_eq!(session.figures().len(), 2);

        assert!(session.select("doc-3"));
        assert!(session.figures().is_empty());

        assert!(!session.select("nope"));
        assert_eq!(session.active_document().map(|d| d.id.as_str()), Some("doc-3"));
    }

    #[test]
    fn test_notes_are_per_document() {
        let mut session = session();
        session.set_notes("chatter matters");
        session.select("doc-2");
        assert_eq!(session.notes(), "");
        session.set_notes("robots");
        session.select("doc-1");
        assert_eq!(session.notes(), "chatter matters");
    }

    #[test]
    fn test_import_activates_first_imported_document() {
        let mut session = session();
        session.import_documents(imported_documents().unwrap());

        assert_eq!(session.library().len(), 8);
        assert_eq!(session.active_document().map(|d| d.id.as_str()), Some("nb-1"));
        let labels: Vec<String> = session.figures().iter().map(|f| f.label.clone()).collect();
        assert_eq!(labels, vec!["Figure 1", "Figure 2", "Figure 3"]);
    }

    #[test]
    fn test_figures_follow_displayed_document_with_duplicate_ids() {
        let library_copy = Document {
            id: "nb-1".to_string(),
            title: "Library copy".to_string(),
            author: "A. Reader".to_string(),
            doc_type: "Journal Article".to_string(),
            source: "Local".to_string(),
            date: "2024-03-01".to_string(),
            content: "Figure 9: From the library document.".into(),
        };
        let imported_copy = Document {
            title: "Imported copy".to_string(),
            content: "Figure 1: From the imported document.".into(),
            ..library_copy.clone()
        };
        let mut session = ReaderSession::new(DocumentLibrary::new(vec![library_copy]));
        session.import_documents(vec![imported_copy]);

        let active = session.active_document().cloned().expect("active document");
        assert_eq!(active.title, "Library copy");
        let figures = session.figures();
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].label, "Figure 9");
        assert_eq!(&*figures[0].context, &*active.content);
    }

    #[test]
    fn test_empty_library() {
        let mut session = ReaderSession::new(DocumentLibrary::default());
        assert!(session.active_document().is_none());
        assert!(session.figures().is_empty());
        session.set_notes("ignored");
        assert_eq!(session.notes(), "");
    }
}

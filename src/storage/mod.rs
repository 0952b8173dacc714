// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::documents::Document;
use crate::extractors::ExtractedFigure;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory holding all output for one document, e.g. `/base_dir/doc-1/`
    pub fn document_dir(&self, document: &Document) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(&document.id);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the extracted figures as a JSON array
    pub fn save_figures(&self, document: &Document, figures: &[ExtractedFigure]) -> Result<PathBuf, StorageError> {
        let file_path = self.document_dir(document)?
            .join(format!("{}_figures.json", document.id));

        let json = serde_json::to_string_pretty(figures)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved {} figures to {}", figures.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the document and its extraction in JSON format
    pub fn save_figures_metadata(&self, document: &Document, figures: &[ExtractedFigure]) -> Result<PathBuf, StorageError> {
        let file_path = self.document_dir(document)?
            .join(format!("{}_figures_meta.json", document.id));

        let metadata = serde_json::json!({
            "id": document.id,
            "title": document.title,
            "author": document.author,
            "type": document.doc_type,
            "source": document.source,
            "date": document.date,
            "content_length": document.content.len(),
            "figure_count": figures.len(),
            "labels": figures.iter().map(|f| f.label.as_str()).collect::<Vec<_>>(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract_figures;

    #[test]
    fn test_save_figures_and_metadata() {
        let base = std::env::temp_dir().join(format!("figscan_storage_{}", std::process::id()));
        let storage = StorageManager::new(&base).expect("storage dir");
        let document = Document {
            id: "doc-t".to_string(),
            title: "Test".to_string(),
            author: "A. Writer".to_string(),
            doc_type: "Journal Article".to_string(),
            source: "Test Journal".to_string(),
            date: "2024-01-01".to_string(),
            content: "Figure 2: Second caption here.\nFigure 1 shows the first one.".into(),
        };
        let figures = extract_figures(&document.content);

        let figures_path = storage.save_figures(&document, &figures).expect("figures saved");
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&figures_path).unwrap()).unwrap();
        assert_eq!(saved[0]["label"], "Figure 1");
        assert_eq!(saved[1]["caption"], "Second caption here.");

        let meta_path = storage.save_figures_metadata(&document, &figures).expect("metadata saved");
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta["figure_count"], 2);
        assert_eq!(meta["type"], "Journal Article");

        let _ = fs::remove_dir_all(&base);
    }
}

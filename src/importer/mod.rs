// src/importer/mod.rs
//! Simulated NotebookLM import. Nothing is fetched: the flow validates the
//! link, reports progress on a timer and hands back the canned documents.
use std::fmt;
use std::time::Duration;
use crate::documents::library::imported_documents;
use crate::documents::Document;
use crate::utils::error::{AppError, ImportError};

const NOTEBOOK_HOST: &str = "notebooklm.google.com";

/// Progress stages reported while an import runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStep {
    Connecting,
    DiscoveringSources,
    ExtractingFigures,
    Complete,
}

impl ImportStep {
    pub const ALL: [ImportStep; 4] = [
        ImportStep::Connecting,
        ImportStep::DiscoveringSources,
        ImportStep::ExtractingFigures,
        ImportStep::Complete,
    ];

    /// Progress bar value: 33% per finished stage, 100% once complete.
    pub fn percent(self) -> u8 {
        match self {
            ImportStep::Connecting => 33,
            ImportStep::DiscoveringSources => 66,
            ImportStep::ExtractingFigures => 99,
            ImportStep::Complete => 100,
        }
    }
}

impl fmt::Display for ImportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ImportStep::Connecting => "Connecting to Google NotebookLM...",
            ImportStep::DiscoveringSources => "Discovering PDF sources...",
            ImportStep::ExtractingFigures => "Running extraction scripts (Figures & Captions)...",
            ImportStep::Complete => "Import complete",
        };
        f.write_str(text)
    }
}

/// When each step fires, measured from the start of the import.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub step_offsets: [Duration; 4],
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            step_offsets: [
                Duration::from_millis(800),
                Duration::from_millis(2000),
                Duration::from_millis(3500),
                Duration::from_millis(4500),
            ],
        }
    }
}

impl ImportConfig {
    /// All steps fire immediately.
    pub fn instant() -> Self {
        Self { step_offsets: [Duration::ZERO; 4] }
    }
}

/// Rejects anything that is not a NotebookLM link.
pub fn validate_url(url: &str) -> Result<(), ImportError> {
    if url.contains(NOTEBOOK_HOST) {
        Ok(())
    } else {
        Err(ImportError::InvalidUrl(url.to_string()))
    }
}

pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Runs the simulated import, calling `on_progress` for each step in order.
    pub async fn run<F>(&self, url: &str, mut on_progress: F) -> Result<Vec<Document>, AppError>
    where
        F: FnMut(ImportStep),
    {
        validate_url(url)?;
        tracing::info!("Starting simulated import from {}", url);

        let mut elapsed = Duration::ZERO;
        for (step, offset) in ImportStep::ALL.iter().zip(self.config.step_offsets.iter()) {
            let wait = offset.saturating_sub(elapsed);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            elapsed = elapsed.max(*offset);
            tracing::debug!("Import step {:?} ({}%)", step, step.percent());
            on_progress(*step);
        }

        let documents = imported_documents()?;
        tracing::info!("Import finished with {} documents", documents.len());
        Ok(documents)
    }
}

// src/main.rs
mod documents;
mod extractors;
mod importer;
mod session;
mod storage;
mod utils;

use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use documents::{citation, render, Document, DocumentLibrary};
use extractors::{ExtractedFigure, FigureExtractor};
use importer::{ImportConfig, Importer};
use session::ReaderSession;
use storage::StorageManager;
use utils::AppError;

/// Document reader backend: figure extraction, citations and exports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON document library to use instead of the built-in samples
    #[arg(short, long, env = "FIGSCAN_LIBRARY", global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List documents in the library
    List,

    /// Read a document with its figures, citation and notes
    Read {
        /// Document id (defaults to the first document)
        #[arg(short, long)]
        doc: Option<String>,

        /// Research notes to attach to the document for this session
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show the figures extracted from a document or a text file
    Figures {
        /// Document id (defaults to the first document)
        #[arg(short, long, conflicts_with = "file")]
        doc: Option<String>,

        /// Plain text file to scan instead of a library document
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print figures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a BibTeX citation for a document
    Cite {
        #[arg(short, long)]
        doc: String,
    },

    /// Write figure reports for one or all documents
    Export {
        /// Document id (all documents if omitted)
        #[arg(short, long)]
        doc: Option<String>,

        /// Output directory for reports
        #[arg(short, long, default_value = "./output")]
        output_dir: PathBuf,

        /// Debug mode - also save annotated HTML with figure references highlighted
        #[arg(long)]
        debug: bool,
    },

    /// Simulate importing documents from a NotebookLM link
    Import {
        #[arg(short, long)]
        url: String,

        /// Skip the simulated progress delays
        #[arg(long)]
        fast: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting figscan with args: {:?}", args);

    // 3. Load the document library
    let library = match &args.library {
        Some(path) => DocumentLibrary::load(path)?,
        None => DocumentLibrary::builtin()?,
    };
    if library.is_empty() {
        tracing::warn!("Document library is empty");
    }
    tracing::debug!("Library holds {} documents", library.len());

    match args.command {
        Command::List => {
            for doc in library.iter() {
                let marker = if doc.is_notebook_extract() { "*" } else { " " };
                println!("{}{:<8} {:<45} {} ({}, {})", marker, doc.id, doc.title, doc.author, doc.doc_type, doc.date);
            }
        }
        Command::Read { doc, note } => {
            let mut session = ReaderSession::new(library);
            if let Some(id) = &doc {
                if !session.select(id) {
                    return Err(utils::error::DocumentError::NotFound(id.clone()).into());
                }
            }
            if let Some(note) = note {
                session.set_notes(note);
            }
            read(&mut session)?;
        }
        Command::Figures { doc, file, json } => {
            let figures = match file {
                Some(path) => {
                    tracing::info!("Scanning text file: {}", path.display());
                    let bytes = std::fs::read(&path)?;
                    FigureExtractor::new().extract_lossy(&bytes)
                }
                None => {
                    let mut session = ReaderSession::new(library);
                    if let Some(id) = &doc {
                        if !session.select(id) {
                            return Err(utils::error::DocumentError::NotFound(id.clone()).into());
                        }
                    }
                    session.figures().to_vec()
                }
            };
            print_figures(&figures, json)?;
        }
        Command::Cite { doc } => {
            let document = library.require(&doc)?;
            println!("{}", citation::bibtex(document));
        }
        Command::Export { doc, output_dir, debug } => {
            export(&library, doc.as_deref(), &output_dir, debug)?;
        }
        Command::Import { url, fast } => {
            let config = if fast { ImportConfig::instant() } else { ImportConfig::default() };
            let importer = Importer::new(config);
            let imported = importer
                .run(&url, |step| println!("[{:>3}%] {}", step.percent(), step))
                .await?;

            let mut session = ReaderSession::new(library);
            session.import_documents(imported);
            println!("\nLibrary now holds {} documents", session.library().len());
            read(&mut session)?;
        }
    }

    Ok(())
}

/// Prints the active document followed by its figures, citation and notes.
fn read(session: &mut ReaderSession) -> Result<(), AppError> {
    let Some(document) = session.active_document().cloned() else {
        println!("No documents to read");
        return Ok(());
    };

    println!("{}", render::render_document(&document));
    print_figures(&session.figures(), false)?;

    println!("\nBibTeX Citation\n{}", citation::bibtex(&document));

    println!("\nResearch Notes");
    match session.notes() {
        "" => println!("  (none)"),
        notes => println!("  {}", notes),
    }
    Ok(())
}

/// Renders the figures panel: a count badge and one card per figure, or the empty state.
fn print_figures(figures: &[ExtractedFigure], json: bool) -> Result<(), AppError> {
    if json {
        let out = serde_json::to_string_pretty(figures)
            .map_err(|e| utils::error::StorageError::SerializationError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Extracted Figures ({})", figures.len());
    if figures.is_empty() {
        println!("  No figures detected");
        println!("  The text was analyzed but no \"Figure X\" references were found.");
        return Ok(());
    }
    for fig in figures {
        println!("  {:<12} Pg {}", fig.label, fig.page);
        println!("    {}", fig.caption);
    }
    Ok(())
}

/// Writes figure reports for the selected document, or every document when none is given.
fn export(library: &DocumentLibrary, doc: Option<&str>, output_dir: &Path, debug: bool) -> Result<(), AppError> {
    let storage = StorageManager::new(output_dir)?;
    let extractor = FigureExtractor::new();

    let targets: Vec<&Document> = match doc {
        Some(id) => vec![library.require(id)?],
        None => library.iter().collect(),
    };

    let mut success_count = 0;
    let mut failure_count = 0;

    for document in targets {
        tracing::info!("Exporting figures for {} ({})", document.id, document.title);
        let figures = extractor.extract(&document.content);

        let saved = storage
            .save_figures(document, &figures)
            .and_then(|_| storage.save_figures_metadata(document, &figures));
        match saved {
            Ok(_) => success_count += 1,
            Err(e) => {
                tracing::error!("Failed to export figures for {}: {}", document.id, e);
                failure_count += 1;
                continue;
            }
        }

        if debug {
            let debug_path = storage.document_dir(document)?.join("content_annotated.html");
            if let Err(e) = utils::html_debug::create_debug_html(&document.content, &debug_path) {
                tracing::warn!("Failed to create debug HTML: {}", e);
            }
        }
    }

    tracing::info!("Export finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Config(format!("Failed to export figures for {} documents", failure_count)));
    }

    Ok(())
}

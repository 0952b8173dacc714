// src/documents/citation.rs
use chrono::{Datelike, NaiveDate};
use crate::documents::models::Document;

const CITATION_NOTE: &str = "Accessed via ScholarRead";
const UNKNOWN_YEAR: &str = "n.d.";

/// Renders a BibTeX `@article` entry for a document.
pub fn bibtex(document: &Document) -> String {
    let year = citation_year(&document.date);
    format!(
        "@article{{{key},\n  title={{{title}}},\n  author={{{author}}},\n  journal={{{journal}}},\n  year={{{year}}},\n  note={{{note}}}\n}}",
        key = citation_key(document, &year),
        title = document.title,
        author = document.author,
        journal = document.source,
        year = year,
        note = CITATION_NOTE,
    )
}

/// Lowercased author surname + year + first title word, e.g. "rostova2023advanced".
pub fn citation_key(document: &Document, year: &str) -> String {
    let surname = document.author.split_whitespace().last().unwrap_or_default();
    let title_word = document.title.split_whitespace().next().unwrap_or_default();
    format!("{}{}{}", surname, year, title_word).to_lowercase()
}

/// Year of an ISO date; falls back to a leading 4-digit year, then "n.d.".
pub fn citation_year(date: &str) -> String {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return parsed.year().to_string();
    }
    match date.get(..4) {
        Some(prefix) if prefix.chars().all(|c| c.is_ascii_digit()) => prefix.to_string(),
        _ => {
            tracing::warn!("Could not determine citation year from date '{}'", date);
            UNKNOWN_YEAR.to_string()
        }
    }
}

// src/extractors/figure.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::{Match, Regex};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

// --- Constants ---
/// Paragraphs treated as one page when simulating page numbers.
pub const PARAGRAPHS_PER_PAGE: usize = 3;
/// Captions shorter than this (in characters) are replaced by the fallback.
pub const MIN_CAPTION_LEN: usize = 5;
pub const FALLBACK_CAPTION: &str = "Visual representation of the described concept.";
const LABEL_PREFIX: &str = "Figure ";

// --- Regex Patterns (Lazy Static) ---
// Matches: "Figure 1:", "Figure 1.", "Figure 1 shows", "Figure 1 illustrates", ...
// Group 1 is the figure number.
static FIGURE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Figure\s+([0-9]+)(?:[:.]|\s+(?:shows|illustrates|depicts|displays|presents|compares))",
    )
    .expect("Failed to compile FIGURE_REF_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFigure {
    pub id: String,      // Unique within one extraction run, e.g. "fig-0-3"
    pub label: String,   // e.g., "Figure 3"
    pub caption: String, // Best-effort caption text
    pub page: usize,     // Simulated page number (1-based)
    pub context: String, // The paragraph the reference was found in, verbatim
}

impl ExtractedFigure {
    /// The figure number digits, exactly as they appeared in the source.
    pub fn number(&self) -> &str {
        self.label.strip_prefix(LABEL_PREFIX).unwrap_or(&self.label)
    }
}

/// The first figure reference found in a paragraph.
#[derive(Debug, Clone, Copy)]
pub struct FigureReference<'a> {
    pub number: &'a str,
    pub span: Match<'a>,
}

/// Finds the first qualifying figure reference in `paragraph`, if any.
pub fn find_reference(paragraph: &str) -> Option<FigureReference<'_>> {
    let caps = FIGURE_REF_RE.captures(paragraph)?;
    let span = caps.get(0)?;
    let number = caps.get(1)?.as_str();
    Some(FigureReference { number, span })
}

/// Trims whitespace and byte-order marks from both ends.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Splits content into non-blank paragraphs, preserving order and the original text.
pub fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').filter(|p| !trim_text(p).is_empty())
}

/// Whether the trimmed paragraph begins with the exact label `Figure <number>`.
/// Such a paragraph is most likely the caption itself rather than a passing mention.
pub fn leads_with_label(paragraph: &str, number: &str) -> bool {
    trim_text(paragraph)
        .strip_prefix(LABEL_PREFIX)
        .map_or(false, |rest| rest.starts_with(number))
}

/// Simulated page for the paragraph at `index` in the filtered paragraph sequence.
pub fn simulated_page(index: usize) -> usize {
    index / PARAGRAPHS_PER_PAGE + 1
}

/// Orders two digit strings by numeric value without parsing (no overflow on long numbers).
pub fn cmp_figure_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// --- Main Extractor Structure ---
/// Scans document text for "Figure N" references and turns them into figure records.
#[derive(Debug, Default, Clone, Copy)]
pub struct FigureExtractor;

impl FigureExtractor {
    pub fn new() -> Self { Self {} }

    /// Extracts figures from document text. Never fails: text without
    /// recognizable references yields an empty vector.
    pub fn extract(&self, content: &str) -> Vec<ExtractedFigure> {
        let (mut figures, _seen) = paragraphs(content).enumerate().fold(
            (Vec::new(), HashSet::new()),
            |(mut figures, mut seen): (Vec<ExtractedFigure>, HashSet<String>), (index, paragraph)| {
                let Some(reference) = find_reference(paragraph) else {
                    return (figures, seen);
                };

                let label = format!("{}{}", LABEL_PREFIX, reference.number);
                if seen.contains(&label) && !leads_with_label(paragraph, reference.number) {
                    tracing::trace!("Skipping repeated mention of {} in paragraph {}", label, index);
                    return (figures, seen);
                }

                let caption = derive_caption(paragraph, &reference);
                let page = simulated_page(index);
                tracing::trace!("Found {} in paragraph {} (page {}): '{}'", label, index, page, caption);

                figures.push(ExtractedFigure {
                    id: format!("fig-{}-{}", figures.len(), reference.number),
                    label: label.clone(),
                    caption,
                    page,
                    context: paragraph.to_string(),
                });
                seen.insert(label);
                (figures, seen)
            },
        );

        // Stable: entries sharing a number keep paragraph order.
        figures.sort_by(|a, b| cmp_figure_numbers(a.number(), b.number()));
        tracing::debug!("Extracted {} figure(s) from {} bytes of content", figures.len(), content.len());
        figures
    }

    /// Extracts figures from raw bytes, replacing invalid UTF-8 sequences first.
    pub fn extract_lossy(&self, content: &[u8]) -> Vec<ExtractedFigure> {
        self.extract(&String::from_utf8_lossy(content))
    }
}

/// Convenience wrapper around [`FigureExtractor::extract`].
#[cfg(test)]
pub fn extract_figures(content: &str) -> Vec<ExtractedFigure> {
    FigureExtractor::new().extract(content)
}

/// Removes the reference from its paragraph and cleans what remains into a caption.
fn derive_caption(paragraph: &str, reference: &FigureReference<'_>) -> String {
    let span = reference.span;
    let without_ref = format!("{}{}", &paragraph[..span.start()], &paragraph[span.end()..]);

    let mut caption = trim_text(&without_ref);
    if let Some(rest) = caption.strip_prefix(|c: char| c == ':' || c == '.') {
        caption = trim_text(rest);
    }
    if caption.is_empty() {
        caption = trim_text(&paragraph[span.end()..]);
    }

    if caption.chars().count() < MIN_CAPTION_LEN {
        FALLBACK_CAPTION.to_string()
    } else {
        caption.to_string()
    }
}

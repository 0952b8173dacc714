// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::extractors::{find_reference, leads_with_label};
use crate::utils::error::AppError;

/// Saves document text to an HTML file with debug highlights.
/// Highlights are `(start, end, type)` byte ranges into `text`.
pub fn save_debug_html(text: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("body { white-space: pre-wrap; font-family: monospace; }\n");
    debug_html.push_str(".highlight-caption { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-mention { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    // Create the modified HTML with markers
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos {
            continue; // Overlaps the previous highlight
        }
        if start > last_pos {
            debug_html.push_str(&escape_html(&text[last_pos..start]));
        }

        let css_class = match highlight_type {
            "caption" => "highlight-caption",
            "mention" => "highlight-mention",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&escape_html(&text[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&escape_html(&text[last_pos..]));
    }

    debug_html.push_str("\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates a debug HTML version of a document with every figure reference highlighted.
/// References leading their paragraph (the same rule the extractor uses for repeats)
/// are marked "caption", the rest "mention".
pub fn create_debug_html(content: &str, filename: &Path) -> Result<(), AppError> {
    save_debug_html(content, filename, &figure_highlights(content))
}

/// Byte ranges of the first figure reference in each paragraph.
pub fn figure_highlights(content: &str) -> Vec<(usize, usize, &'static str)> {
    let mut highlights = Vec::new();
    let mut offset = 0;

    for paragraph in content.split('\n') {
        if let Some(reference) = find_reference(paragraph) {
            let kind = if leads_with_label(paragraph, reference.number) {
                "caption"
            } else {
                "mention"
            };
            highlights.push((offset + reference.span.start(), offset + reference.span.end(), kind));
        }
        offset += paragraph.len() + 1;
    }

    highlights
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// src/documents/render.rs
use once_cell::sync::Lazy;
use regex::Regex;
use crate::documents::models::Document;
use crate::extractors::figure::trim_text;

// Section headings used by the sample documents, e.g. "Abstract" or "1. Introduction".
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:Abstract|Introduction|Conclusion|\d+\.|Key Parameters|Overview|Executive Summary|Bell's Inequality|Applications|Future Directions|The Perceptron|Gradient Descent)",
    )
    .expect("Failed to compile HEADING_RE")
});

/// One line of document content as the reader lays it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Break,
    Heading(&'a str),
    Paragraph(&'a str),
}

/// Classifies a single line. Headings and paragraphs carry the trimmed text.
pub fn classify_line(line: &str) -> Block<'_> {
    let trimmed = trim_text(line);
    if trimmed.is_empty() {
        Block::Break
    } else if HEADING_RE.is_match(trimmed) {
        Block::Heading(trimmed)
    } else {
        Block::Paragraph(trimmed)
    }
}

/// Splits content on newlines and classifies every line, blank ones included.
pub fn blocks(content: &str) -> Vec<Block<'_>> {
    content.split('\n').map(classify_line).collect()
}

/// Renders a document for the terminal: a title header with author, date and
/// source, then the content with headings underlined.
pub fn render_document(document: &Document) -> String {
    let byline = format!("{} \u{2022} {} \u{2022} {}", document.author, document.date, document.source);
    let rule_len = document.title.chars().count().max(byline.chars().count());

    let mut out = String::new();
    out.push_str(&document.title);
    out.push('\n');
    out.push_str(&byline);
    out.push('\n');
    out.push_str(&"=".repeat(rule_len));
    out.push('\n');

    for block in blocks(&document.content) {
        match block {
            Block::Break => out.push('\n'),
            Block::Heading(text) => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
                out.push_str(&"-".repeat(text.chars().count()));
                out.push('\n');
            }
            Block::Paragraph(text) => {
                out.push_str(text);
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::DocumentLibrary;

    #[test]
    fn test_classify_headings() {
        assert_eq!(classify_line("   Abstract   "), Block::Heading("Abstract"));
        assert_eq!(classify_line("3. Chatter Analysis"), Block::Heading("3. Chatter Analysis"));
        assert_eq!(classify_line("Bell's Inequality"), Block::Heading("Bell's Inequality"));
        // Prefix match, as in "Overview of results"
        assert_eq!(classify_line("Overview of results"), Block::Heading("Overview of results"));
    }

    #[test]
    fn test_classify_paragraphs_and_breaks() {
        assert_eq!(classify_line(""), Block::Break);
        assert_eq!(classify_line(" \u{feff} "), Block::Break);
        // Case-sensitive and anchored at the start
        assert_eq!(classify_line("abstract thinking"), Block::Paragraph("abstract thinking"));
        assert_eq!(classify_line("See 1. above"), Block::Paragraph("See 1. above"));
        assert_eq!(classify_line("Safety"), Block::Paragraph("Safety"));
    }

    #[test]
    fn test_render_builtin_document() {
        let library = DocumentLibrary::builtin().expect("embedded library should parse");
        let document = library.require("doc-1").expect("doc-1 exists");
        let blocks = blocks(&document.content);

        assert_eq!(blocks.first(), Some(&Block::Heading("Abstract")));
        assert!(blocks.contains(&Block::Heading("5. Conclusion")));
        assert!(blocks.contains(&Block::Break));

        let rendered = render_document(document);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("Advanced CNC Machining Protocols"));
        assert_eq!(
            lines.next(),
            Some("Dr. Elena Rostova \u{2022} 2023-10-15 \u{2022} Intl. Journal of Manufacturing")
        );
        assert!(rendered.contains("1. Introduction\n---------------\n"));
    }
}

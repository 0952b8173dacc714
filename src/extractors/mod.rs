// src/extractors/mod.rs
pub mod figure;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use figure::{
    find_reference,
    leads_with_label,
    ExtractedFigure,
    FigureExtractor,
    FigureReference,
    FALLBACK_CAPTION,
};

#[cfg(test)]
pub use figure::extract_figures;

// src/documents/mod.rs
pub mod citation;
pub mod library;
pub mod models;
pub mod render;

pub use library::DocumentLibrary;
pub use models::Document;

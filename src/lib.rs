//! doxtract: structured content extraction for .docx files
//!
//! This library reconstructs a document's section hierarchy from its flat
//! paragraph/table stream (nested sections with generated multi-level
//! numbering, parent/child links, and per-section content) and packages
//! sections, tables, images, headers/footers, and endnotes into JSON/HTML
//! artifacts.

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod html;
pub mod media;
pub mod processor;

// Re-export commonly used types
pub use config::{CropRect, ProcessingConfig};
pub use convert::Capabilities;
pub use document::{
    Block, DocumentStructure, HierarchyBuilder, ImageRecord, ParagraphBlock, ProcessingResult,
    Section, TableBlock, TableRecord, TocEntry,
};
pub use error::{Error, Result};
pub use media::MediaExtractor;
pub use processor::DocxProcessor;

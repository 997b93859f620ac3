//! Core data structures for document representation
//!
//! This module defines the public types used to represent extracted document
//! content: the transient block stream consumed by the hierarchy builder and
//! the section/table/image records packaged into the final result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One content unit from the source document, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Table(TableBlock),
}

/// A paragraph block: raw text, the resolved style name, and whether the
/// paragraph carries embedded media.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphBlock {
    pub text: String,
    pub style: Option<String>,
    pub has_media: bool,
}

impl ParagraphBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            has_media: false,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_media(mut self) -> Self {
        self.has_media = true;
        self
    }
}

/// A table block: row-major grid of cell text. Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBlock {
    pub cells: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }
}

/// Fallback title used when a heading's computed title would be empty.
pub const ORPHANED_SECTION_TITLE: &str = "Orphaned Section";

/// Title of the implicit pseudo-section holding content that appears before
/// the first heading.
pub const TITLE_PAGE_TITLE: &str = "TITLE PAGE";

/// A document section reconstructed from the heading hierarchy.
///
/// `content` holds own content only: each non-heading paragraph's text with
/// a trailing line break, plus the markup of any table encountered while the
/// section was active. The aggregated view (own content plus all descendant
/// titles and content) lives in [`ProcessingResult::content`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    /// Heading depth, 1 = top. `Some(1)` for the implicit title page.
    pub level: Option<u8>,
    pub content: String,
    /// Title of the enclosing section; `None` for top-level sections and
    /// the title page.
    pub parent: Option<String>,
    /// Immediate child titles, in encounter order.
    pub children: Vec<String>,
    /// Filenames of images attributed to this section.
    pub images: Vec<String>,
    /// Filenames of tables placed inside this section.
    pub tables: Vec<String>,
}

/// An extracted table: generated filename, rendered markup, and the source
/// grid dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRecord {
    pub filename: String,
    pub html: String,
    pub rows: usize,
    pub columns: usize,
}

/// An extracted image: generated filename, byte size, best-effort pixel
/// dimensions, format tag, and the best-effort owning section title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub filename: String,
    pub size_bytes: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: String,
    pub section: Option<String>,
}

/// Table-of-contents entry mirroring the section hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TocEntry {
    pub title: String,
    pub level: u8,
    pub children: Vec<TocEntry>,
}

/// The aggregate result of processing one document. Built once per input,
/// immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Section title -> aggregated content (own + all descendants).
    pub content: BTreeMap<String, String>,
    /// Section title -> own content only.
    pub content_without_children: BTreeMap<String, String>,
    /// Section title -> full hierarchy object.
    pub sections: BTreeMap<String, Section>,
    /// Image filename -> record.
    pub images: BTreeMap<String, ImageRecord>,
    /// Table filename -> record.
    pub tables: BTreeMap<String, TableRecord>,
    pub toc: Option<Vec<TocEntry>>,
    /// Header/footer part stem -> extracted text.
    pub headers_footers: Option<BTreeMap<String, String>>,
    /// `endnote_<id>` -> extracted text.
    pub endnotes: Option<BTreeMap<String, String>>,
    /// Generated HTML view of the sections, when requested.
    pub html: Option<String>,
    /// Path of the converted PDF, when conversion succeeded.
    pub pdf_path: Option<PathBuf>,
    pub processing_time_seconds: f64,
    pub file_size_bytes: u64,
    /// Non-fatal diagnostics. A non-empty `errors` list does not mean the
    /// document failed to produce output.
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    /// Artifact name -> path, for outputs persisted to disk.
    pub output_paths: BTreeMap<String, PathBuf>,
}

impl ProcessingResult {
    pub(crate) fn empty() -> Self {
        Self {
            content: BTreeMap::new(),
            content_without_children: BTreeMap::new(),
            sections: BTreeMap::new(),
            images: BTreeMap::new(),
            tables: BTreeMap::new(),
            toc: None,
            headers_footers: None,
            endnotes: None,
            html: None,
            pdf_path: None,
            processing_time_seconds: 0.0,
            file_size_bytes: 0,
            warnings: Vec::new(),
            errors: Vec::new(),
            output_paths: BTreeMap::new(),
        }
    }
}

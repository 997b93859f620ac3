//! Document data structures and the structure-extraction pipeline
//!
//! This module provides the block model produced from a .docx file, the
//! single-pass hierarchy builder that reconstructs the section tree from
//! the block stream, and the auxiliary-part readers.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub(crate) mod parsing;
pub mod query;

// Re-export the public pipeline surface
pub use io::{extract_endnotes, extract_headers_footers};
pub use loader::load_blocks;
pub use models::*;
pub use parsing::structure::{DocumentStructure, HierarchyBuilder};
pub use query::build_toc;

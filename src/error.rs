//! Error types for doxtract.

use std::io;
use thiserror::Error;

/// Result type alias for doxtract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid .docx document.
    #[error("Invalid .docx file: {0}")]
    InvalidFormat(String),

    /// Error reading the OOXML container.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing the document XML tree.
    #[error("Document parsing error: {0}")]
    DocxParse(String),

    /// Error reading an auxiliary XML part (headers, footers, endnotes).
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error decoding or re-encoding an embedded image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error serializing a result artifact.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The processing configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// External conversion (LibreOffice) failed or timed out.
    #[error("Conversion error: {0}")]
    Convert(String),
}

//! Processing configuration
//!
//! Options controlling what gets extracted and where outputs land. A config
//! can be loaded from the user's config directory or an explicit TOML file,
//! with CLI flags layered on top by the binary.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Error;

/// Rectangular crop applied to every extracted image, expressed as
/// percentages of the original width/height trimmed from each edge.
/// All-zero means no cropping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CropRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CropRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        let edges = [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ];
        for (name, value) in edges {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::Config(format!(
                    "crop {name} must be between 0 and 100, got {value}"
                )));
            }
        }
        if self.left + self.right >= 100.0 || self.top + self.bottom >= 100.0 {
            return Err(Error::Config(
                "opposite crop edges must leave a visible area".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for document processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Output directory for extracted files; `None` keeps everything
    /// in memory.
    pub output_dir: Option<PathBuf>,
    pub save_images: bool,
    pub save_tables: bool,
    pub save_content: bool,
    pub extract_toc: bool,
    pub include_headers_footers: bool,
    pub extract_endnotes: bool,
    pub generate_html: bool,
    /// Convert the document to PDF via LibreOffice when available.
    pub convert_to_pdf: bool,
    /// Upper bound for one conversion subprocess, in seconds.
    pub convert_timeout_secs: u64,
    /// Crop applied to every extracted image.
    pub image_crop: CropRect,
    /// Images larger than this are skipped with a warning.
    pub max_image_size_mb: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            save_images: true,
            save_tables: true,
            save_content: true,
            extract_toc: true,
            include_headers_footers: true,
            extract_endnotes: true,
            generate_html: false,
            convert_to_pdf: false,
            convert_timeout_secs: 120,
            image_crop: CropRect::default(),
            max_image_size_mb: 10,
        }
    }
}

impl ProcessingConfig {
    /// Load config from the user's config directory, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Self::default())
    }

    /// Load config from an explicit TOML file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the user's config directory.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            fs::write(&config_path, content)?;
        }
        Ok(())
    }

    /// Path of the config file in the user's config directory.
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("doxtract").join("config.toml"))
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        self.image_crop.validate()?;
        if self.max_image_size_mb == 0 {
            return Err(Error::Config(
                "max_image_size_mb must be at least 1".to_string(),
            ));
        }
        if self.convert_timeout_secs == 0 {
            return Err(Error::Config(
                "convert_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

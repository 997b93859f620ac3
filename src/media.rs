//! Embedded media extraction
//!
//! Resolves the document's embedded media to bytes straight from the
//! archive, introspects dimensions where the codec allows it, applies the
//! configured crop, and persists the files. Media failures are per-element:
//! a blob that cannot be read or decoded is skipped with a diagnostic and
//! never aborts document processing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use image::ImageFormat;
use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use crate::config::CropRect;
use crate::document::models::ImageRecord;
use crate::error::Result;

static MEDIA_SEQUENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Per-document media extractor. Filename numbering starts at 1 and is
/// scoped to this instance.
#[derive(Debug)]
pub struct MediaExtractor {
    crop: CropRect,
    max_bytes: u64,
    images: BTreeMap<String, ImageRecord>,
    warnings: Vec<String>,
}

impl MediaExtractor {
    pub fn new(crop: CropRect, max_image_size_mb: u64) -> Self {
        Self {
            crop,
            max_bytes: max_image_size_mb * 1024 * 1024,
            images: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Extract every media blob from the archive, in document numbering
    /// order. The k-th blob is attributed to the k-th entry of
    /// `attributions` (the builder's per-occurrence section list). Files
    /// are persisted under `<output_dir>/images/` when an output directory
    /// is given.
    pub fn extract(
        &mut self,
        file_path: &Path,
        attributions: &[String],
        output_dir: Option<&Path>,
    ) -> Result<()> {
        let file = File::open(file_path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut entry_names: Vec<String> = archive
            .file_names()
            .filter(|name| {
                name.strip_prefix("word/media/")
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .map(str::to_string)
            .collect();
        // word/media/image1.png, image2.png, ... in document numbering order
        entry_names.sort_by_key(|name| (media_sequence_key(name), name.clone()));

        let images_dir = match output_dir {
            Some(dir) => {
                let images_dir = dir.join("images");
                std::fs::create_dir_all(&images_dir)?;
                Some(images_dir)
            }
            None => None,
        };

        let mut sequence = 0usize;
        for name in entry_names {
            let mut bytes = Vec::new();
            match archive.by_name(&name).map(|mut e| e.read_to_end(&mut bytes)) {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    self.warn(format!("failed to read media entry {name}: {e}"));
                    continue;
                }
                Err(e) => {
                    self.warn(format!("failed to open media entry {name}: {e}"));
                    continue;
                }
            }

            if bytes.len() as u64 > self.max_bytes {
                self.warn(format!(
                    "skipping {name}: {} bytes exceeds the configured maximum",
                    bytes.len()
                ));
                continue;
            }

            let extension = name
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            let Some(format) = ImageFormat::from_extension(&extension) else {
                self.warn(format!("skipping {name}: unsupported media encoding"));
                continue;
            };

            let mut width = None;
            let mut height = None;
            match image::load_from_memory(&bytes) {
                Ok(decoded) => {
                    let (w, h) = (decoded.width(), decoded.height());
                    if self.crop.is_noop() {
                        width = Some(w);
                        height = Some(h);
                    } else {
                        let (x, y, cw, ch) = crop_bounds(w, h, &self.crop);
                        let cropped = decoded.crop_imm(x, y, cw, ch);
                        let mut out = Cursor::new(Vec::new());
                        match cropped.write_to(&mut out, format) {
                            Ok(()) => {
                                width = Some(cw);
                                height = Some(ch);
                                bytes = out.into_inner();
                            }
                            Err(e) => {
                                self.warn(format!("crop failed for {name}: {e}"));
                                width = Some(w);
                                height = Some(h);
                            }
                        }
                    }
                }
                Err(e) => {
                    // Dimensions stay absent; the raw bytes are still kept.
                    log::debug!("could not introspect {name}: {e}");
                }
            }

            sequence += 1;
            let filename = format!("image_{sequence}.{extension}");

            if let Some(dir) = &images_dir {
                if let Err(e) = std::fs::write(dir.join(&filename), &bytes) {
                    self.warn(format!("failed to write {filename}: {e}"));
                }
            }

            self.images.insert(
                filename.clone(),
                ImageRecord {
                    filename,
                    size_bytes: bytes.len() as u64,
                    width,
                    height,
                    format: extension.clone(),
                    section: attributions.get(sequence - 1).cloned(),
                },
            );
        }

        Ok(())
    }

    pub fn into_parts(self) -> (BTreeMap<String, ImageRecord>, Vec<String>) {
        (self.images, self.warnings)
    }

    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Numeric part of a media entry name, for document-order sorting
/// ("image10.png" after "image2.png").
fn media_sequence_key(name: &str) -> u64 {
    MEDIA_SEQUENCE
        .find(name.trim_start_matches("word/media/"))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(u64::MAX)
}

/// Pixel bounds of the configured crop. Edges are percentages of the
/// original dimensions; the visible area never collapses below one pixel.
fn crop_bounds(width: u32, height: u32, crop: &CropRect) -> (u32, u32, u32, u32) {
    let x = (width as f32 * crop.left / 100.0).round() as u32;
    let y = (height as f32 * crop.top / 100.0).round() as u32;
    let trim_right = (width as f32 * crop.right / 100.0).round() as u32;
    let trim_bottom = (height as f32 * crop.bottom / 100.0).round() as u32;
    let cropped_width = width.saturating_sub(x + trim_right).max(1);
    let cropped_height = height.saturating_sub(y + trim_bottom).max(1);
    (x, y, cropped_width, cropped_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_bounds_quarters() {
        let crop = CropRect::new(25.0, 25.0, 25.0, 25.0);
        assert_eq!(crop_bounds(100, 80, &crop), (25, 20, 50, 40));
    }

    #[test]
    fn test_crop_bounds_never_collapse() {
        let crop = CropRect::new(49.0, 49.0, 49.0, 49.0);
        let (_, _, w, h) = crop_bounds(2, 2, &crop);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_media_sequence_key_orders_numerically() {
        assert!(
            media_sequence_key("word/media/image2.png")
                < media_sequence_key("word/media/image10.png")
        );
    }

    #[test]
    fn test_unrecognized_extension_is_not_an_image_format() {
        assert!(ImageFormat::from_extension("emf").is_none());
        assert!(ImageFormat::from_extension("png").is_some());
    }
}

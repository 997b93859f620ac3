//! Document processing orchestration
//!
//! `DocxProcessor` wires the pipeline together: block loading, hierarchy
//! construction, aggregation, media/table extraction, auxiliary parts,
//! optional HTML/PDF artifacts, and output persistence. One `process_file`
//! call is one self-contained execution; nothing is shared across
//! documents.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::ProcessingConfig;
use crate::convert::{convert_to_pdf, Capabilities};
use crate::document::models::ProcessingResult;
use crate::document::{build_toc, load_blocks, HierarchyBuilder};
use crate::error::Result;
use crate::html::render_html;
use crate::media::MediaExtractor;

/// Main processor for .docx structured-content extraction.
#[derive(Debug)]
pub struct DocxProcessor {
    config: ProcessingConfig,
    capabilities: Capabilities,
}

impl DocxProcessor {
    /// Build a processor, validating the configuration and probing
    /// optional capabilities once.
    pub fn new(config: ProcessingConfig) -> Result<Self> {
        config.validate()?;
        let capabilities = if config.convert_to_pdf {
            Capabilities::probe()
        } else {
            Capabilities::none()
        };
        Ok(Self {
            config,
            capabilities,
        })
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Process a .docx file and extract content, tables, images, and
    /// auxiliary parts.
    pub fn process_file(&self, file_path: &Path) -> Result<ProcessingResult> {
        let started = Instant::now();
        log::info!("processing {}", file_path.display());

        if let Some(output_dir) = &self.config.output_dir {
            std::fs::create_dir_all(output_dir)?;
        }

        // Fatal structural failures surface here, before the core runs.
        let blocks = load_blocks(file_path)?;

        let mut result = ProcessingResult::empty();
        result.file_size_bytes = std::fs::metadata(file_path)?.len();

        let structure = HierarchyBuilder::process(&blocks);
        result.warnings.extend(structure.warnings.iter().cloned());

        result.content = structure.aggregated_content();
        result.content_without_children = structure.own_content();
        result.sections = structure.sections();

        for table in &structure.tables {
            result
                .tables
                .insert(table.filename.clone(), table.clone());
        }

        if self.config.extract_toc {
            result.toc = Some(build_toc(&structure));
        }

        if self.config.save_images {
            let mut extractor =
                MediaExtractor::new(self.config.image_crop, self.config.max_image_size_mb);
            match extractor.extract(
                file_path,
                &structure.media_attributions,
                self.config.output_dir.as_deref(),
            ) {
                Ok(()) => {
                    let (images, warnings) = extractor.into_parts();
                    for record in images.values() {
                        if let Some(section_title) = &record.section {
                            if let Some(section) = result.sections.get_mut(section_title) {
                                section.images.push(record.filename.clone());
                            }
                        }
                    }
                    result.images = images;
                    result.warnings.extend(warnings);
                }
                Err(e) => {
                    log::warn!("image extraction failed: {e}");
                    result.errors.push(format!("image extraction failed: {e}"));
                }
            }
        }

        if self.config.include_headers_footers {
            match crate::document::io::extract_headers_footers(file_path) {
                Ok(parts) if !parts.is_empty() => result.headers_footers = Some(parts),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("header/footer extraction failed: {e}");
                    result
                        .errors
                        .push(format!("header/footer extraction failed: {e}"));
                }
            }
        }

        if self.config.extract_endnotes {
            match crate::document::io::extract_endnotes(file_path) {
                Ok(notes) if !notes.is_empty() => result.endnotes = Some(notes),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("endnote extraction failed: {e}");
                    result.errors.push(format!("endnote extraction failed: {e}"));
                }
            }
        }

        if self.config.generate_html {
            let document_title = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            result.html = Some(render_html(&structure, document_title));
        }

        if self.config.convert_to_pdf {
            self.convert_pdf(file_path, &mut result);
        }

        if self.config.output_dir.is_some() {
            self.save_outputs(&mut result)?;
        }

        result.processing_time_seconds = started.elapsed().as_secs_f64();
        log::info!(
            "extracted {} sections, {} tables, {} images in {:.2}s",
            result.sections.len(),
            result.tables.len(),
            result.images.len(),
            result.processing_time_seconds
        );

        Ok(result)
    }

    /// Process in-memory .docx bytes by staging them in a temp file.
    pub fn process_bytes(&self, docx_bytes: &[u8]) -> Result<ProcessingResult> {
        let mut tmp = tempfile::Builder::new().suffix(".docx").tempfile()?;
        tmp.write_all(docx_bytes)?;
        tmp.flush()?;
        self.process_file(tmp.path())
    }

    /// Optional-feature seam: a missing converter or a failed conversion
    /// degrades to a warning, never a processing error.
    fn convert_pdf(&self, file_path: &Path, result: &mut ProcessingResult) {
        let Some(output_dir) = &self.config.output_dir else {
            result
                .warnings
                .push("PDF conversion requested without an output directory".to_string());
            return;
        };
        let Some(soffice) = &self.capabilities.soffice else {
            result
                .warnings
                .push("PDF conversion requested but no LibreOffice binary was found".to_string());
            return;
        };

        let timeout = Duration::from_secs(self.config.convert_timeout_secs);
        match convert_to_pdf(soffice, file_path, output_dir, timeout) {
            Ok(pdf_path) => {
                result
                    .output_paths
                    .insert("pdf".to_string(), pdf_path.clone());
                result.pdf_path = Some(pdf_path);
            }
            Err(e) => {
                log::warn!("PDF conversion failed: {e}");
                result.warnings.push(format!("PDF conversion failed: {e}"));
            }
        }
    }

    fn save_outputs(&self, result: &mut ProcessingResult) -> Result<()> {
        let Some(output_dir) = &self.config.output_dir else {
            return Ok(());
        };

        if self.config.save_content {
            let content_path = output_dir.join("content.json");
            write_json(&content_path, &result.content)?;
            result
                .output_paths
                .insert("content".to_string(), content_path);

            let own_path = output_dir.join("content_without_children.json");
            write_json(&own_path, &result.content_without_children)?;
            result
                .output_paths
                .insert("content_without_children".to_string(), own_path);
        }

        if let Some(parts) = &result.headers_footers {
            let path = output_dir.join("headers_footers.json");
            write_json(&path, parts)?;
            result
                .output_paths
                .insert("headers_footers".to_string(), path);
        }

        if let Some(notes) = &result.endnotes {
            let path = output_dir.join("endnotes.json");
            write_json(&path, notes)?;
            result.output_paths.insert("endnotes".to_string(), path);
        }

        if let Some(html) = &result.html {
            let path = output_dir.join("content.html");
            std::fs::write(&path, html)?;
            result.output_paths.insert("html".to_string(), path);
        }

        if self.config.save_tables && !result.tables.is_empty() {
            let tables_dir = output_dir.join("tables");
            std::fs::create_dir_all(&tables_dir)?;
            for table in result.tables.values() {
                std::fs::write(tables_dir.join(&table.filename), &table.html)?;
            }
            result.output_paths.insert("tables".to_string(), tables_dir);
        }

        if self.config.save_images && !result.images.is_empty() {
            // Image files were written during extraction
            result
                .output_paths
                .insert("images".to_string(), output_dir.join("images"));
        }

        Ok(())
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

impl Default for DocxProcessor {
    fn default() -> Self {
        Self {
            config: ProcessingConfig::default(),
            capabilities: Capabilities::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CropRect;

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProcessingConfig {
            image_crop: CropRect::new(0.0, 0.0, 0.0, 200.0),
            ..ProcessingConfig::default()
        };
        assert!(DocxProcessor::new(config).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let processor = DocxProcessor::default();
        assert!(processor
            .process_file(Path::new("no-such-file.docx"))
            .is_err());
    }
}

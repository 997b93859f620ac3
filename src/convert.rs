//! External document conversion
//!
//! PDF conversion delegates to a headless LibreOffice subprocess. The
//! binary is located once per processor and carried as an explicit
//! capability; a missing binary degrades the feature instead of failing
//! the document.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

const CONVERTER_CANDIDATES: &[&str] = &["soffice", "libreoffice"];
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Optional external capabilities, probed once and threaded through
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Resolved LibreOffice binary, when one answers `--version`.
    pub soffice: Option<PathBuf>,
}

impl Capabilities {
    /// Probe the environment for optional collaborators.
    pub fn probe() -> Self {
        let soffice = CONVERTER_CANDIDATES.iter().find_map(|candidate| {
            let available = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok_and(|status| status.success());
            available.then(|| PathBuf::from(candidate))
        });

        if soffice.is_none() {
            log::debug!("no LibreOffice binary found; PDF conversion unavailable");
        }
        Self { soffice }
    }

    /// Capabilities with every probe skipped, for callers that never use
    /// the optional features.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Convert a document to PDF with a bounded blocking subprocess call.
/// Returns the path of the produced PDF.
pub fn convert_to_pdf(
    soffice: &Path,
    docx_path: &Path,
    output_dir: &Path,
    timeout: Duration,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let mut child = Command::new(soffice)
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(output_dir)
        .arg(docx_path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Convert(format!("failed to launch {}: {e}", soffice.display())))?;

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Convert(format!(
                        "conversion timed out after {}s",
                        timeout.as_secs()
                    )));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(Error::Convert(format!("failed to wait for converter: {e}"))),
        }
    };

    if !status.success() {
        return Err(Error::Convert(format!(
            "converter exited with status {status}"
        )));
    }

    let stem = docx_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let pdf_path = output_dir.join(format!("{stem}.pdf"));
    if !pdf_path.exists() {
        return Err(Error::Convert(format!(
            "converter succeeded but {} was not produced",
            pdf_path.display()
        )));
    }

    Ok(pdf_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_a_convert_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = convert_to_pdf(
            Path::new("definitely-not-a-real-converter"),
            Path::new("input.docx"),
            tmp.path(),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Convert(_)));
    }
}

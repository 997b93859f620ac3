//! Container I/O and auxiliary-part extraction
//!
//! Validates the .docx container and reads the XML parts the parsed
//! document tree does not surface: headers, footers, and endnotes. Those
//! parts are read straight out of the archive with an event reader; only
//! their visible text is kept.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Validates that the file is a legitimate .docx file.
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if extension != "docx" {
        return Err(Error::InvalidFormat(format!(
            "expected a .docx file, got .{extension}"
        )));
    }

    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(Error::InvalidFormat(
                "this appears to be an Excel file (.xlsx), not a Word document".to_string(),
            ));
        }
        return Err(Error::InvalidFormat(
            "missing word/document.xml; the file may be corrupted".to_string(),
        ));
    }

    Ok(())
}

/// Extract header and footer text, keyed by part stem ("header1",
/// "footer2", ...). Parts that fail to parse are skipped.
pub fn extract_headers_footers(file_path: &Path) -> Result<BTreeMap<String, String>> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let part_names: Vec<String> = archive
        .file_names()
        .filter(|name| {
            name.strip_prefix("word/")
                .is_some_and(|rest| {
                    (rest.starts_with("header") || rest.starts_with("footer"))
                        && rest.ends_with(".xml")
                        && !rest.contains('/')
                })
        })
        .map(str::to_string)
        .collect();

    let mut parts = BTreeMap::new();
    for name in part_names {
        let mut xml = String::new();
        archive.by_name(&name)?.read_to_string(&mut xml)?;

        let stem = name
            .trim_start_matches("word/")
            .trim_end_matches(".xml")
            .to_string();
        match collect_visible_text(&xml) {
            Ok(text) if !text.trim().is_empty() => {
                parts.insert(stem, text.trim_end().to_string());
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("skipping unreadable part {name}: {e}");
            }
        }
    }

    Ok(parts)
}

/// Extract endnote text keyed `endnote_<id>`. The separator pseudo-notes
/// Word stores under non-positive ids are excluded.
pub fn extract_endnotes(file_path: &Path) -> Result<BTreeMap<String, String>> {
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut xml = String::new();
    match archive.by_name("word/endnotes.xml") {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(_) => return Ok(BTreeMap::new()),
    }

    parse_endnotes(&xml)
}

fn parse_endnotes(xml: &str) -> Result<BTreeMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut endnotes = BTreeMap::new();
    let mut current_id: Option<i64> = None;
    let mut current_text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:endnote" => {
                current_id = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == b"w:id")
                    .and_then(|a| String::from_utf8_lossy(&a.value).parse::<i64>().ok());
                current_text.clear();
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:endnote" => {
                if let Some(id) = current_id.take() {
                    if id >= 1 && !current_text.trim().is_empty() {
                        endnotes
                            .insert(format!("endnote_{id}"), current_text.trim().to_string());
                    }
                }
            }
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => {
                in_text_run = true;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => {
                in_text_run = false;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:p" => {
                if current_id.is_some() {
                    current_text.push('\n');
                }
            }
            Ok(Event::Text(ref e)) if in_text_run && current_id.is_some() => {
                current_text.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(endnotes)
}

/// Collect the visible text of one XML part: `w:t` run content, with
/// paragraph ends as line breaks.
fn collect_visible_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => {
                in_text_run = true;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => {
                in_text_run = false;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:p" => {
                text.push('\n');
            }
            Ok(Event::Text(ref e)) if in_text_run => {
                text.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_visible_text() {
        let xml = r#"<w:hdr><w:p><w:r><w:t>Confidential</w:t></w:r><w:r><w:t> draft</w:t></w:r></w:p><w:p><w:r><w:t>Page header</w:t></w:r></w:p></w:hdr>"#;
        let text = collect_visible_text(xml).unwrap();
        assert_eq!(text, "Confidential draft\nPage header\n");
    }

    #[test]
    fn test_collect_visible_text_ignores_non_text_elements() {
        let xml = r#"<w:ftr><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Footer</w:t></w:r></w:p></w:ftr>"#;
        assert_eq!(collect_visible_text(xml).unwrap(), "Footer\n");
    }

    #[test]
    fn test_parse_endnotes_skips_separators() {
        let xml = r#"<w:endnotes>
            <w:endnote w:id="-1"><w:p><w:r><w:t>sep</w:t></w:r></w:p></w:endnote>
            <w:endnote w:id="0"><w:p><w:r><w:t>cont</w:t></w:r></w:p></w:endnote>
            <w:endnote w:id="1"><w:p><w:r><w:t>First real note</w:t></w:r></w:p></w:endnote>
            <w:endnote w:id="2"><w:p><w:r><w:t>Second note</w:t></w:r></w:p></w:endnote>
        </w:endnotes>"#;

        let endnotes = parse_endnotes(xml).unwrap();
        assert_eq!(endnotes.len(), 2);
        assert_eq!(endnotes["endnote_1"], "First real note");
        assert_eq!(endnotes["endnote_2"], "Second note");
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let err = validate_docx_file(Path::new("notes.txt")).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }
}

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use doxtract::{DocxProcessor, ProcessingConfig};

fn write_report_docx(dir: &Path) -> PathBuf {
    let path = dir.join("report.docx");
    let file = File::create(&path).expect("failed to create fixture");

    let table = Table::new(vec![
        TableRow::new(vec![
            cell("Metric"),
            cell("Value"),
        ]),
        TableRow::new(vec![cell("Revenue"), cell("42")]),
    ]);

    Docx::new()
        .add_paragraph(heading_para("Introduction", "Heading1"))
        .add_paragraph(body_para("This report covers the last quarter."))
        .add_paragraph(heading_para("Results", "Heading1"))
        .add_paragraph(body_para("Key figures follow."))
        .add_table(table)
        .add_paragraph(heading_para("Details", "Heading2"))
        .add_paragraph(body_para("Nothing unusual."))
        .build()
        .pack(file)
        .expect("failed to pack fixture");

    path
}

fn heading_para(text: &str, style: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text)).style(style)
}

fn body_para(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(body_para(text))
}

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    #[test]
    fn test_processing_builds_expected_sections() {
        let tmp = tempfile::tempdir().unwrap();
        let docx_path = write_report_docx(tmp.path());

        let processor = DocxProcessor::new(ProcessingConfig::default()).unwrap();
        let result = processor.process_file(&docx_path).unwrap();

        let titles: Vec<_> = result.sections.keys().cloned().collect();
        assert!(titles.contains(&"1 Introduction".to_string()), "{titles:?}");
        assert!(titles.contains(&"2 Results".to_string()));
        assert!(titles.contains(&"2.1 Details".to_string()));

        let intro = &result.sections["1 Introduction"];
        assert_eq!(intro.content, "This report covers the last quarter.\n");
        assert_eq!(intro.parent, None);

        let details = &result.sections["2.1 Details"];
        assert_eq!(details.parent.as_deref(), Some("2 Results"));

        // The table was active under "2 Results" when encountered
        let results_section = &result.sections["2 Results"];
        assert_eq!(results_section.tables, vec!["table_1.html"]);
        assert!(results_section.content.contains("Table\n<table"));
        assert!(result.tables["table_1.html"].html.contains("Revenue"));
        assert_eq!(result.tables["table_1.html"].rows, 2);
        assert_eq!(result.tables["table_1.html"].columns, 2);

        // Aggregation pulls the child into the parent
        assert!(result.content["2 Results"].contains("2.1 Details"));
        assert!(result.content["2 Results"].contains("Nothing unusual."));
        assert!(!result.content_without_children["2 Results"].contains("Nothing unusual."));

        assert!(result.file_size_bytes > 0);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
    }

    #[test]
    fn test_outputs_persisted_to_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let docx_path = write_report_docx(tmp.path());
        let output_dir = tmp.path().join("out");

        let config = ProcessingConfig {
            output_dir: Some(output_dir.clone()),
            generate_html: true,
            ..ProcessingConfig::default()
        };
        let processor = DocxProcessor::new(config).unwrap();
        let result = processor.process_file(&docx_path).unwrap();

        let content_path = output_dir.join("content.json");
        assert!(content_path.exists());
        let content: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&content_path).unwrap()).unwrap();
        assert_eq!(content, result.content);

        assert!(output_dir.join("content_without_children.json").exists());
        assert!(output_dir.join("tables").join("table_1.html").exists());

        let html = std::fs::read_to_string(output_dir.join("content.html")).unwrap();
        assert!(html.contains("<h1>1 Introduction</h1>"));
        assert!(html.contains("<h2>2.1 Details</h2>"));

        assert_eq!(result.output_paths["content"], content_path);
    }

    #[test]
    fn test_toc_generated_and_optional() {
        let tmp = tempfile::tempdir().unwrap();
        let docx_path = write_report_docx(tmp.path());

        let processor = DocxProcessor::new(ProcessingConfig::default()).unwrap();
        let result = processor.process_file(&docx_path).unwrap();
        let toc = result.toc.unwrap();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[1].children[0].title, "2.1 Details");

        let config = ProcessingConfig {
            extract_toc: false,
            ..ProcessingConfig::default()
        };
        let processor = DocxProcessor::new(config).unwrap();
        let result = processor.process_file(&docx_path).unwrap();
        assert!(result.toc.is_none());
    }

    #[test]
    fn test_process_bytes_matches_process_file() {
        let tmp = tempfile::tempdir().unwrap();
        let docx_path = write_report_docx(tmp.path());
        let bytes = std::fs::read(&docx_path).unwrap();

        let processor = DocxProcessor::new(ProcessingConfig::default()).unwrap();
        let from_file = processor.process_file(&docx_path).unwrap();
        let from_bytes = processor.process_bytes(&bytes).unwrap();

        assert_eq!(from_file.content, from_bytes.content);
        assert_eq!(from_file.sections, from_bytes.sections);
    }

    #[test]
    fn test_reprocessing_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let docx_path = write_report_docx(tmp.path());

        let processor = DocxProcessor::new(ProcessingConfig::default()).unwrap();
        let first = processor.process_file(&docx_path).unwrap();
        let second = processor.process_file(&docx_path).unwrap();

        assert_eq!(first.content, second.content);
        assert_eq!(first.sections, second.sections);
        assert_eq!(
            serde_json::to_string(&first.content).unwrap(),
            serde_json::to_string(&second.content).unwrap()
        );
    }

    #[test]
    fn test_invalid_extension_rejected_before_core() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("not-a-doc.txt");
        std::fs::write(&path, "plain text").unwrap();

        let processor = DocxProcessor::new(ProcessingConfig::default()).unwrap();
        assert!(processor.process_file(&path).is_err());
    }
}

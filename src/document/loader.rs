//! Block loading
//!
//! Walks the parsed document tree and flattens it into the ordered block
//! stream the hierarchy builder consumes: paragraphs with their resolved
//! style name and embedded-media flag, and tables as row-major cell grids.
//! This is the only place the core touches format-specific structures.

use std::path::Path;

use crate::error::{Error, Result};

use super::io::validate_docx_file;
use super::models::{Block, ParagraphBlock, TableBlock};

/// Load the ordered block sequence from a .docx file.
pub fn load_blocks(file_path: &Path) -> Result<Vec<Block>> {
    validate_docx_file(file_path)?;

    let file_data = std::fs::read(file_path)?;
    let docx = docx_rs::read_docx(&file_data).map_err(|e| Error::DocxParse(e.to_string()))?;

    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                blocks.push(Block::Paragraph(ParagraphBlock {
                    text: extract_paragraph_text(para),
                    style: para.property.style.as_ref().map(|s| s.val.clone()),
                    has_media: paragraph_has_media(para),
                }));
            }
            docx_rs::DocumentChild::Table(table) => {
                blocks.push(Block::Table(TableBlock {
                    cells: extract_table_cells(table),
                }));
            }
            _ => {
                // Section properties, bookmarks and the like carry no block
                // content.
            }
        }
    }

    Ok(blocks)
}

/// Extract plain text from a paragraph, handling runs, tracked changes,
/// tabs and line breaks.
fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                text.push_str(&extract_run_text(run));
            }
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        text.push_str(&extract_run_text(run));
                    }
                }
            }
            docx_rs::ParagraphChild::Delete(_) => {
                // Skip deletions (track changes)
            }
            _ => {}
        }
    }

    text.trim().to_string()
}

fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

/// Whether any run in the paragraph embeds a drawing.
fn paragraph_has_media(para: &docx_rs::Paragraph) -> bool {
    para.children.iter().any(|child| {
        if let docx_rs::ParagraphChild::Run(run) = child {
            run.children
                .iter()
                .any(|run_child| matches!(run_child, docx_rs::RunChild::Drawing(_)))
        } else {
            false
        }
    })
}

/// Flatten a table into its row-major cell-text grid.
fn extract_table_cells(table: &docx_rs::Table) -> Vec<Vec<String>> {
    let mut cells = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let mut cell_text = String::new();

            for content in &cell.children {
                if let docx_rs::TableCellContent::Paragraph(para) = content {
                    let para_text = extract_paragraph_text(para);
                    if !cell_text.is_empty() && !para_text.is_empty() {
                        cell_text.push(' ');
                    }
                    cell_text.push_str(&para_text);
                }
            }

            row_cells.push(cell_text);
        }

        cells.push(row_cells);
    }

    cells
}

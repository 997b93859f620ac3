//! Table rendering
//!
//! Converts a table block's cell grid into a self-contained HTML fragment
//! with the header row distinguished from body rows. All cell text is
//! escaped for safe embedding; styling is plain inline borders since cell
//! formatting metadata is not carried on the block.

use super::super::models::TableBlock;

const TABLE_STYLE: &str = "border-collapse: collapse; border: 1px solid black;";
const CELL_STYLE: &str = "border: 1px solid black; padding: 5px;";

/// A rendered table plus the grid dimensions it was rendered from.
#[derive(Debug, Clone)]
pub(crate) struct RenderedTable {
    pub(crate) html: String,
    pub(crate) rows: usize,
    pub(crate) columns: usize,
}

/// Render a table block to HTML. Row 0 becomes the header row.
pub(crate) fn render_table(table: &TableBlock) -> RenderedTable {
    let mut html = format!("<table style='{TABLE_STYLE}'>");

    let mut rows = table.cells.iter();
    if let Some(header) = rows.next() {
        html.push_str("<thead><tr>");
        for cell in header {
            html.push_str(&format!(
                "<th style='{CELL_STYLE}'><p>{}</p></th>",
                escape_html(cell)
            ));
        }
        html.push_str("</tr></thead>");
    }

    html.push_str("<tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!(
                "<td style='{CELL_STYLE}'><p>{}</p></td>",
                escape_html(cell)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    RenderedTable {
        html,
        rows: table.cells.len(),
        columns: table.cells.iter().map(Vec::len).max().unwrap_or(0),
    }
}

/// Escape text for embedding in HTML element content or attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> TableBlock {
        TableBlock::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_header_and_body_rows() {
        let rendered = render_table(&grid(&[
            &["Name", "Value"],
            &["alpha", "1"],
            &["beta", "2"],
        ]));

        assert_eq!(rendered.rows, 3);
        assert_eq!(rendered.columns, 2);
        assert_eq!(rendered.html.matches("<th ").count(), 2);
        assert_eq!(rendered.html.matches("<td ").count(), 4);
        assert!(rendered.html.contains("<thead><tr>"));
        assert!(rendered.html.contains("<p>alpha</p>"));
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let rendered = render_table(&grid(&[&["a < b & c"], &["\"quoted\""]]));
        assert!(rendered.html.contains("a &lt; b &amp; c"));
        assert!(rendered.html.contains("&quot;quoted&quot;"));
        assert!(!rendered.html.contains("a < b"));
    }

    #[test]
    fn test_empty_grid() {
        let rendered = render_table(&TableBlock::default());
        assert_eq!(rendered.rows, 0);
        assert_eq!(rendered.columns, 0);
        assert!(rendered.html.contains("<tbody></tbody>"));
    }

    #[test]
    fn test_ragged_rows_use_widest_column_count() {
        let rendered = render_table(&grid(&[&["a"], &["b", "c", "d"]]));
        assert_eq!(rendered.columns, 3);
        assert_eq!(rendered.rows, 2);
    }
}

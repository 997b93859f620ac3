//! HTML rendering of the extracted sections
//!
//! Produces the `content.html` artifact: one block per section in
//! encounter order, the heading tag depth derived from the title's leading
//! numbering token, own content following with line breaks preserved. All
//! text is escaped; this is a structural view, not a visual-fidelity
//! conversion.

use crate::document::parsing::table::escape_html;
use crate::document::DocumentStructure;

/// Render the section hierarchy to a standalone HTML document.
pub fn render_html(structure: &DocumentStructure, document_title: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n</head>\n<body>\n",
        escape_html(document_title)
    ));

    for title in structure.titles() {
        let depth = heading_depth(title);
        html.push_str(&format!(
            "<h{depth}>{}</h{depth}>\n",
            escape_html(title)
        ));

        if let Some(section) = structure.section(title) {
            if !section.content.is_empty() {
                let body = escape_html(section.content.trim_end_matches('\n')).replace('\n', "<br>\n");
                html.push_str(&format!("<p>{body}</p>\n"));
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Heading tag depth from the title's leading numbering token: no dots is
/// a top-level heading, one dot the second level, and so on, capped at 6.
/// Titles without a numbering token (the title page) are top-level.
fn heading_depth(title: &str) -> usize {
    let token = title.split_whitespace().next().unwrap_or_default();
    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        let dots = token.trim_end_matches('.').matches('.').count();
        (dots + 1).min(6)
    } else {
        1
    }
}

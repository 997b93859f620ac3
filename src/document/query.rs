//! Read-only queries over the finished document structure.

use super::models::TocEntry;
use super::parsing::structure::DocumentStructure;

/// Generate a nested table of contents mirroring the section hierarchy,
/// roots in encounter order.
pub fn build_toc(structure: &DocumentStructure) -> Vec<TocEntry> {
    (0..structure.nodes.len())
        .filter(|&id| structure.nodes[id].parent.is_none())
        .map(|id| build_entry(structure, id))
        .collect()
}

fn build_entry(structure: &DocumentStructure, id: usize) -> TocEntry {
    let node = &structure.nodes[id];
    TocEntry {
        title: node.title.clone(),
        level: node.level.unwrap_or(1),
        children: node
            .children
            .iter()
            .map(|&child| build_entry(structure, child))
            .collect(),
    }
}

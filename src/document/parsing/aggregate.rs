//! Content aggregation
//!
//! Produces the "full" view of every section: its own content followed,
//! depth-first and post-order, by each descendant's title and content.
//! Children are visited in encounter order; a child's aggregate is complete
//! before it is appended to the parent.
//!
//! The traversal is an explicit worklist with a visited set. The stack-based
//! construction cannot produce cycles, but a cycle introduced by a bug
//! upstream must terminate the walk rather than exhaust the call stack.

use std::collections::BTreeMap;

use super::structure::DocumentStructure;

impl DocumentStructure {
    /// Title -> aggregated content for every section.
    pub fn aggregated_content(&self) -> BTreeMap<String, String> {
        let count = self.nodes.len();
        let mut aggregated: Vec<Option<String>> = vec![None; count];
        let mut visited = vec![false; count];

        let roots = (0..count).filter(|&id| self.nodes[id].parent.is_none());
        for root in roots {
            let mut worklist = vec![(root, false)];
            while let Some((id, children_done)) = worklist.pop() {
                if children_done {
                    let mut content = self.nodes[id].content.clone();
                    for &child in &self.nodes[id].children {
                        if let Some(child_aggregate) = aggregated[child].as_ref() {
                            content.push_str(&self.nodes[child].title);
                            content.push_str("\n\n");
                            content.push_str(child_aggregate);
                        }
                    }
                    aggregated[id] = Some(content);
                } else if !visited[id] {
                    visited[id] = true;
                    worklist.push((id, true));
                    for &child in self.nodes[id].children.iter().rev() {
                        worklist.push((child, false));
                    }
                }
            }
        }

        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| {
                let content = aggregated[id]
                    .take()
                    .unwrap_or_else(|| node.content.clone());
                (node.title.clone(), content)
            })
            .collect()
    }

    /// Title -> own content only.
    pub fn own_content(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|node| (node.title.clone(), node.content.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::structure::HierarchyBuilder;
    use crate::document::models::{Block, ParagraphBlock};

    fn para(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock::new(text))
    }

    fn heading(level: u8, text: &str) -> Block {
        Block::Paragraph(ParagraphBlock::new(text).with_style(format!("Heading {level}")))
    }

    #[test]
    fn test_leaf_sections_aggregate_to_own_content() {
        let structure = HierarchyBuilder::process(&[
            heading(1, "Intro"),
            para("Hello"),
            heading(1, "Scope"),
            para("World"),
        ]);

        let aggregated = structure.aggregated_content();
        assert_eq!(aggregated["1 Intro"], "Hello\n");
        assert_eq!(aggregated["2 Scope"], "World\n");
    }

    #[test]
    fn test_parent_contains_descendant_titles_and_content_in_order() {
        let structure = HierarchyBuilder::process(&[
            heading(1, "Root"),
            para("root text"),
            heading(2, "A"),
            para("a text"),
            heading(3, "A1"),
            para("a1 text"),
            heading(2, "B"),
            para("b text"),
        ]);

        let aggregated = structure.aggregated_content();
        let root = &aggregated["1 Root"];
        assert_eq!(
            root,
            "root text\n1.1 A\n\na text\n1.1.1 A1\n\na1 text\n1.2 B\n\nb text\n"
        );

        // Depth-first order: every descendant title appears after its
        // parent's own content and before the next sibling subtree.
        let positions: Vec<_> = ["root text", "1.1 A", "a text", "1.1.1 A1", "a1 text", "1.2 B"]
            .iter()
            .map(|needle| root.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_child_aggregate_is_complete_before_parent_append() {
        let structure = HierarchyBuilder::process(&[
            heading(1, "Top"),
            heading(2, "Mid"),
            heading(3, "Leaf"),
            para("leaf text"),
        ]);

        let aggregated = structure.aggregated_content();
        assert_eq!(aggregated["1.1.1 Leaf"], "leaf text\n");
        assert_eq!(aggregated["1.1 Mid"], "1.1.1 Leaf\n\nleaf text\n");
        assert_eq!(
            aggregated["1 Top"],
            "1.1 Mid\n\n1.1.1 Leaf\n\nleaf text\n"
        );
    }

    #[test]
    fn test_title_page_is_an_aggregation_root() {
        let structure = HierarchyBuilder::process(&[
            para("cover text"),
            heading(2, "Sub"),
            para("sub text"),
        ]);

        let aggregated = structure.aggregated_content();
        // The title page has no children; the orphan level-2 section is its
        // own root.
        assert_eq!(aggregated["TITLE PAGE"], "cover text\n");
        assert_eq!(aggregated["1 Sub"], "sub text\n");
    }

    #[test]
    fn test_own_content_view_unchanged_by_aggregation() {
        let structure = HierarchyBuilder::process(&[
            heading(1, "Root"),
            para("root text"),
            heading(2, "A"),
            para("a text"),
        ]);

        let own = structure.own_content();
        assert_eq!(own["1 Root"], "root text\n");
        assert_eq!(own["1.1 A"], "a text\n");

        let aggregated = structure.aggregated_content();
        assert_eq!(aggregated["1 Root"], "root text\n1.1 A\n\na text\n");
        // own view is not mutated by computing the aggregate
        assert_eq!(structure.own_content()["1 Root"], "root text\n");
    }
}

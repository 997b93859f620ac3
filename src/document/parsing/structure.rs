//! Document structure extraction
//!
//! The hierarchy builder consumes the ordered block stream in a single
//! forward pass and reconstructs the heading hierarchy: nested sections
//! with generated numbering and parent/child links, tables routed into the
//! section active when they are encountered, and per-section image
//! attribution.
//!
//! One builder is instantiated per document; all counters, the heading
//! stack, and the filename sequences are local to that instance. Sections
//! live in an integer-id arena with a title-to-id map, so titles are
//! enforced unique at insertion time and child links cannot dangle.

use std::collections::{BTreeMap, HashMap};

use super::super::models::{
    Block, ParagraphBlock, Section, TableBlock, TableRecord, ORPHANED_SECTION_TITLE,
    TITLE_PAGE_TITLE,
};
use super::heading::classify_heading;
use super::numbering::{has_manual_numbering, SectionCounters};
use super::table::render_table;

/// One section in the arena. Parent/child links are arena ids.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) title: String,
    pub(crate) level: Option<u8>,
    pub(crate) content: String,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
}

/// An open heading on the chain from the document root to the active
/// section.
#[derive(Debug)]
struct Frame {
    node: usize,
    level: u8,
}

/// Single-pass builder for the section hierarchy of one document.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    counters: SectionCounters,
    stack: Vec<Frame>,
    active: Option<usize>,
    image_sections: Vec<String>,
    media_attributions: Vec<String>,
    table_mapping: BTreeMap<String, Vec<String>>,
    tables: Vec<TableRecord>,
    warnings: Vec<String>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pass over a block sequence.
    pub fn process(blocks: &[Block]) -> DocumentStructure {
        let mut builder = Self::new();
        for block in blocks {
            builder.push(block);
        }
        builder.finish()
    }

    /// Consume one block in document order.
    pub fn push(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.paragraph(para),
            Block::Table(table) => self.table(table),
        }
    }

    /// Finalize the pass. The section open at end-of-stream is already in
    /// the arena; nothing is flushed mid-stream.
    pub fn finish(self) -> DocumentStructure {
        DocumentStructure {
            nodes: self.nodes,
            index: self.index,
            image_sections: self.image_sections,
            media_attributions: self.media_attributions,
            table_mapping: self.table_mapping,
            tables: self.tables,
            warnings: self.warnings,
        }
    }

    fn paragraph(&mut self, para: &ParagraphBlock) {
        // Pure formatting noise: no text, no media.
        if para.text.trim().is_empty() && !para.has_media {
            return;
        }

        match para.style.as_deref().and_then(classify_heading) {
            Some(level) => self.open_section(&para.text, level),
            None => self.append_content(&para.text),
        }

        if para.has_media {
            self.record_media();
        }
    }

    fn open_section(&mut self, text: &str, level: u8) {
        let numbering = self.counters.advance(level);

        // Parent is the nearest open heading strictly shallower than the
        // new one; an equal-level sibling shares its parent.
        let parent = match self.stack.last() {
            Some(top) if top.level < level => Some(top.node),
            Some(top) if top.level == level => self.nodes[top.node].parent,
            Some(_) => {
                while self.stack.last().is_some_and(|frame| frame.level >= level) {
                    self.stack.pop();
                }
                self.stack.last().map(|frame| frame.node)
            }
            None => None,
        };

        // Headings the author already numbered keep their text verbatim.
        let mut title = if has_manual_numbering(text) {
            text.to_string()
        } else {
            format!("{numbering} {text}")
        };
        if title.trim().is_empty() {
            title = ORPHANED_SECTION_TITLE.to_string();
        }
        let title = self.intern_title(title);

        let id = self.nodes.len();
        self.nodes.push(Node {
            title: title.clone(),
            level: Some(level),
            content: String::new(),
            parent,
            children: Vec::new(),
        });
        self.index.insert(title, id);
        if let Some(parent_id) = parent {
            self.nodes[parent_id].children.push(id);
        }

        while self.stack.last().is_some_and(|frame| frame.level >= level) {
            self.stack.pop();
        }
        self.stack.push(Frame { node: id, level });
        self.active = Some(id);
    }

    fn append_content(&mut self, text: &str) {
        let id = self.active_or_title_page();
        let content = &mut self.nodes[id].content;
        content.push_str(text);
        content.push('\n');
    }

    fn table(&mut self, table: &TableBlock) {
        let rendered = render_table(table);
        let filename = format!("table_{}.html", self.tables.len() + 1);

        let id = self.active_or_title_page();
        let content = &mut self.nodes[id].content;
        content.push_str("Table\n");
        content.push_str(&rendered.html);
        content.push('\n');

        let title = self.nodes[id].title.clone();
        self.table_mapping
            .entry(title)
            .or_default()
            .push(filename.clone());
        self.tables.push(TableRecord {
            filename,
            html: rendered.html,
            rows: rendered.rows,
            columns: rendered.columns,
        });
    }

    fn record_media(&mut self) {
        // paragraph() has already opened or created the owning section
        let Some(id) = self.active else { return };
        let title = self.nodes[id].title.clone();
        if !self.image_sections.contains(&title) {
            self.image_sections.push(title.clone());
        }
        self.media_attributions.push(title);
    }

    /// Active section id, lazily creating the implicit title page when
    /// content appears before the first heading. The title page is not a
    /// heading ancestor: it never lands on the stack.
    fn active_or_title_page(&mut self) -> usize {
        if let Some(id) = self.active {
            return id;
        }
        let title = self.intern_title(TITLE_PAGE_TITLE.to_string());
        let id = self.nodes.len();
        self.nodes.push(Node {
            title: title.clone(),
            level: Some(1),
            content: String::new(),
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(title, id);
        self.active = Some(id);
        id
    }

    /// Enforce title uniqueness at insertion time: collisions get a
    /// deterministic numeric suffix instead of overwriting earlier data.
    fn intern_title(&mut self, title: String) -> String {
        if !self.index.contains_key(&title) {
            return title;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{title} ({n})");
            if !self.index.contains_key(&candidate) {
                self.warnings.push(format!(
                    "duplicate section title {title:?} renamed to {candidate:?}"
                ));
                return candidate;
            }
            n += 1;
        }
    }
}

/// The finished structure of one document.
#[derive(Debug)]
pub struct DocumentStructure {
    pub(crate) nodes: Vec<Node>,
    pub(crate) index: HashMap<String, usize>,
    /// Titles of sections containing at least one image, in encounter
    /// order, deduplicated.
    pub image_sections: Vec<String>,
    /// One owning-section title per media-flagged paragraph, in document
    /// order. Used to attribute extracted media blobs to sections.
    pub media_attributions: Vec<String>,
    /// Section title -> table filenames placed inside it.
    pub table_mapping: BTreeMap<String, Vec<String>>,
    /// Rendered tables in document order.
    pub tables: Vec<TableRecord>,
    pub warnings: Vec<String>,
}

impl DocumentStructure {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Section titles in encounter order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.title.as_str())
    }

    /// Build the public view of one section.
    pub fn section(&self, title: &str) -> Option<Section> {
        self.index.get(title).map(|&id| self.build_section(id))
    }

    /// Build the complete section mapping keyed by title.
    pub fn sections(&self) -> BTreeMap<String, Section> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.title.clone(), self.build_section(id)))
            .collect()
    }

    fn build_section(&self, id: usize) -> Section {
        let node = &self.nodes[id];
        Section {
            title: node.title.clone(),
            level: node.level,
            content: node.content.clone(),
            parent: node.parent.map(|p| self.nodes[p].title.clone()),
            children: node
                .children
                .iter()
                .map(|&c| self.nodes[c].title.clone())
                .collect(),
            images: Vec::new(),
            tables: self
                .table_mapping
                .get(&node.title)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

//! Output-format independent document representation
//!
//! Composers emit a linear sequence of [`Node`]s. A [`DocumentSerializer`]
//! turns that sequence into concrete bytes (PDF, SVG, ...).

use serde::{Deserialize, Serialize};

/// Text direction of the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Rtl,
    Ltr,
}

/// Horizontal alignment of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Start of the line in the document direction (right for RTL)
    #[default]
    Start,
    Center,
    End,
    Justify,
}

/// Font and size settings shared by every builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_family: String,
    /// Body text size in points
    pub body_size: f32,
    pub heading_size: f32,
    pub title_size: f32,
    pub small_size: f32,
    /// Width of embedded signature images in millimetres
    pub signature_width_mm: u32,
    /// Width of embedded attachment images in millimetres
    pub attachment_width_mm: u32,
    pub line_spacing: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "David".to_string(),
            body_size: 12.0,
            heading_size: 13.0,
            title_size: 16.0,
            small_size: 10.0,
            signature_width_mm: 45,
            attachment_width_mm: 160,
            line_spacing: 1.5,
        }
    }
}

/// A styled span of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    /// Font size in points; `None` inherits the body size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Default::default()
        }
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }
}

/// A block of runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    #[serde(default)]
    pub align: Align,
    /// Indentation level (0 = flush)
    #[serde(default)]
    pub indent: u8,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn indented(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_bold(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(|run| run.bold)
    }
}

/// A section title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 = document title, 2 = section, 3 = subsection
    pub level: u8,
    pub text: String,
    /// Font size in points
    pub size: f32,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub underline: bool,
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cell {
    pub runs: Vec<Run>,
    /// Shaded background (header cells)
    #[serde(default)]
    pub shaded: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            shaded: false,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::bold(text)],
            shaded: true,
        }
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A grid of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Table {
    /// Relative column widths; the length defines the column count
    pub columns: Vec<u16>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(default = "default_true")]
    pub borders: bool,
}

fn default_true() -> bool {
    true
}

impl Table {
    pub fn new(columns: Vec<u16>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            borders: true,
        }
    }

    pub fn without_borders(mut self) -> Self {
        self.borders = false;
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }
}

/// An embedded raster or vector image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub data: Vec<u8>,
    pub width_mm: u32,
    #[serde(default)]
    pub align: Align,
}

/// One element of the linear document sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Heading(Heading),
    Paragraph(Paragraph),
    Table(Table),
    Image(Image),
    PageBreak,
}

impl Node {
    /// Plain text carried by the node, tables flattened row by row
    pub fn text(&self) -> String {
        match self {
            Node::Heading(heading) => heading.text.clone(),
            Node::Paragraph(paragraph) => paragraph.text(),
            Node::Table(table) => table
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(Cell::plain_text)
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Image(_) | Node::PageBreak => String::new(),
        }
    }
}

/// A composed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    pub title: String,
    pub direction: Direction,
    pub style: StyleConfig,
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(title: impl Into<String>, style: StyleConfig) -> Self {
        Self {
            title: title.into(),
            direction: Direction::Rtl,
            style,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Text of every node, one node per line
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(Node::text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn page_break_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::PageBreak))
            .count()
    }

    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Image(image) => Some(image),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    /// Index of the first heading whose text contains `needle`
    pub fn find_heading(&self, needle: &str) -> Option<usize> {
        self.nodes.iter().position(|node| match node {
            Node::Heading(heading) => heading.text.contains(needle),
            _ => false,
        })
    }
}

/// Renders a [`Document`] into a concrete binary format
pub trait DocumentSerializer {
    type Error: std::error::Error;

    /// MIME type of the produced bytes
    fn mime_type(&self) -> &'static str;

    fn serialize(&self, document: &Document) -> Result<Vec<u8>, Self::Error>;
}

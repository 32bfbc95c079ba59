//! Declarative layout model for the résumé documents.
//!
//! The layouts in [`crate::layout`] describe a page as data: sections with a
//! heading, content blocks and trailing spacing.  The model has no notion of
//! pages or fonts; [`crate::render`] turns it into `genpdf` elements and lets
//! `genpdf` paginate.  Keeping the two apart means section logic can be tested
//! without any fonts installed.

use crate::richtext::Span;

/// Default gap after a section, in points.
pub const SECTION_GAP_PT: f64 = 20.0;

/// Horizontal alignment of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Paragraph made of styled spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
}

impl RichParagraph {
    /// Creates a left aligned paragraph from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Bordered grid with a shaded header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    weights: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with equally weighted columns.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let weights = vec![1; header.len()];
        Self {
            header,
            weights,
            rows: Vec::new(),
        }
    }

    /// Sets relative column widths; ignored unless there is one weight per column.
    pub fn with_weights(mut self, weights: impl Into<Vec<usize>>) -> Self {
        let weights = weights.into();
        if weights.len() == self.header.len() {
            self.weights = weights;
        }
        self
    }

    /// Appends a data row, padding or truncating it to the column count.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    /// Appends a row of empty cells.
    pub fn push_blank_row(&mut self) {
        self.rows.push(vec![String::new(); self.header.len()]);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Two-column table with shaded labels on the left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyValueTable {
    rows: Vec<(String, String)>,
}

impl KeyValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }
}

/// Framed box reserved for the applicant's photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoBox {
    caption: String,
    image: Option<Vec<u8>>,
}

impl PhotoBox {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<Vec<u8>>) -> Self {
        self.image = image;
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }
}

/// Content blocks that make up a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(RichParagraph),
    Table(Table),
    KeyValue(KeyValueTable),
    Photo(PhotoBox),
    /// Horizontal line across the content width.
    Rule,
    /// Vertical gap in points.
    Space(u16),
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Single-span paragraph.
    pub fn text(span: impl Into<Span>) -> Self {
        Self::paragraph(vec![span.into()])
    }
}

/// Logical representation of a document section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    heading: Option<String>,
    blocks: Vec<Block>,
    gap_after_pt: f64,
}

impl Section {
    /// Creates a section with a heading.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            blocks: Vec::new(),
            gap_after_pt: SECTION_GAP_PT,
        }
    }

    /// Creates a section without a heading, e.g. the document title.
    pub fn untitled() -> Self {
        Self {
            heading: None,
            blocks: Vec::new(),
            gap_after_pt: SECTION_GAP_PT,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn gap_after_pt(&self) -> f64 {
        self.gap_after_pt
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    pub fn with_gap_after(mut self, gap_pt: f64) -> Self {
        self.gap_after_pt = gap_pt;
        self
    }

    /// Tables contained in this section, in order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

/// A complete document layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    title: String,
    sections: Vec<Section>,
}

impl Layout {
    /// Creates an empty layout; `title` becomes the PDF metadata title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Finds the first section with the given heading.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.heading() == Some(heading))
    }
}

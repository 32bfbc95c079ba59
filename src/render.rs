//! PDF rendering of document trees.
//!
//! [`Renderer`] resolves its font family once at construction and is otherwise
//! stateless: each [`Renderer::render`] call lays out one tree, converts the
//! layout into `genpdf` elements and returns the finished bytes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::{debug, info};

use genpdf::elements::{FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document, Element, Margins, PaperSize, Size};

use crate::builder::DocumentBuilder;
use crate::config::RenderConfig;
use crate::document::{DocumentKind, DocumentTree};
use crate::elements::{mm_to_f64, pt, HorizontalRule, PhotoFrame, ShadedCell, VerticalSpace};
use crate::error::Result;
use crate::fonts::{resolve_font_family, ResolvedFontFamily};
use crate::generator::{build_basic, build_detailed};
use crate::layout::{layout_document, LayoutOptions};
use crate::localize::Labels;
use crate::metadata::{layout_fingerprint, pin_metadata};
use crate::model::{Block, HorizontalAlignment, KeyValueTable, Layout, RichParagraph, Table};
use crate::resume::Resume;
use crate::richtext::{Span, BODY_SIZE};

const HEADING_SIZE: u8 = 16;
const HEADING_GAP_PT: f64 = 10.0;
const FOOTER_SIZE: u8 = 9;
const FOOTER_HEIGHT_PT: f64 = 20.0;
const KEY_COLUMN_PT: f64 = 80.0;
const CELL_PADDING_V_PT: f64 = 6.0;
const CELL_PADDING_H_PT: f64 = 8.0;
const KEY_PADDING_V_PT: f64 = 8.0;
const KEY_PADDING_H_PT: f64 = 12.0;

/// A finished PDF together with the metadata needed to store it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPdf {
    pub kind: DocumentKind,
    /// Applicant name the document was rendered for.
    pub title: String,
    /// Conventional UTF-8 file name, e.g. `Jane Doe_履歴書.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RenderedPdf {
    /// ASCII-only alternative to [`RenderedPdf::file_name`].
    pub fn ascii_file_name(&self) -> String {
        self.kind.ascii_file_name(&self.title)
    }

    /// Writes the PDF into `dir` and returns the path written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>, ascii_name: bool) -> Result<PathBuf> {
        let name = if ascii_name {
            self.ascii_file_name()
        } else {
            self.file_name.clone()
        };
        let path = dir.as_ref().join(name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Renders document trees to PDF bytes.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RenderConfig,
    fonts: ResolvedFontFamily,
}

impl Renderer {
    /// Validates `config` and resolves its font chain.
    ///
    /// Fails with [`crate::Error::FontsUnavailable`] when no family loads.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let fonts = resolve_font_family(&config.fonts)?;
        info!(
            "Renderer ready in {} mode with font family '{}' from {}",
            config.mode,
            fonts.name,
            fonts.directory.display()
        );
        Ok(Self { config, fonts })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Layout options for the next render; reads the local date when none is configured.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            mode: self.config.mode,
            sanitize: self.config.sanitize_enabled(),
            generated_on: self.generated_on(),
        }
    }

    fn generated_on(&self) -> NaiveDate {
        self.config
            .generated_on
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Renders one tree; the document kind follows the tree.
    pub fn render(&self, tree: &DocumentTree) -> Result<RenderedPdf> {
        let layout = layout_document(tree, &self.layout_options());
        let bytes = self.render_layout(&layout)?;

        let kind = tree.kind();
        let title = tree.basic_info().name.clone();
        let file_name = kind.file_name(&title);
        info!("Rendered {} ({} bytes)", file_name, bytes.len());

        Ok(RenderedPdf {
            kind,
            title,
            file_name,
            bytes,
        })
    }

    /// Builds both trees for `resume` with the configured mode and renders them,
    /// rirekisho first.
    pub fn render_resume(&self, resume: &Resume) -> Result<[RenderedPdf; 2]> {
        let mode = self.config.mode;
        Ok([
            self.render(&build_basic(resume, mode))?,
            self.render(&build_detailed(resume, mode))?,
        ])
    }

    /// Converts a layout into PDF bytes.
    ///
    /// Dates and identifiers in the file come from the generation date and the
    /// layout, so the same layout always produces the same bytes.
    pub fn render_layout(&self, layout: &Layout) -> Result<Vec<u8>> {
        let mut document = self.document_for(layout);

        for section in layout.sections() {
            if let Some(heading) = section.heading() {
                document.push(paragraph(&RichParagraph::new(vec![Span::new(heading)
                    .bold()
                    .sized(HEADING_SIZE)])));
                document.push(VerticalSpace::points(HEADING_GAP_PT));
            }
            for block in section.blocks() {
                self.push_block(&mut document, block)?;
            }
            if section.gap_after_pt() > 0.0 {
                document.push(VerticalSpace::points(section.gap_after_pt()));
            }
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;

        let generated_on = self.generated_on();
        let bytes = pin_metadata(&bytes, generated_on, &layout_fingerprint(layout, generated_on))?;
        debug!("Layout '{}' produced {} bytes", layout.title(), bytes.len());
        Ok(bytes)
    }

    fn document_for(&self, layout: &Layout) -> Document {
        let margin = pt(self.config.margin_pt);
        let mut builder = DocumentBuilder::new()
            .with_title(layout.title())
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(margin, margin, margin, margin));

        if self.config.page_numbers {
            let label = Labels::for_mode(self.config.mode).page;
            builder = builder.with_footer(pt(FOOTER_HEIGHT_PT), move |page| {
                Paragraph::new(format!("{label} {page}"))
                    .aligned(Alignment::Center)
                    .styled(Style::new().with_font_size(FOOTER_SIZE))
            });
        }

        let mut document = builder.build(self.fonts.family.clone());
        document.set_font_size(BODY_SIZE);
        document
    }

    fn push_block(&self, document: &mut Document, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(content) => document.push(paragraph(content)),
            Block::Table(table) => document.push(grid(table)?),
            Block::KeyValue(table) => document.push(self.key_value_grid(table)?),
            Block::Photo(photo) => document.push(PhotoFrame::new(photo.caption(), photo.image())),
            Block::Rule => document.push(HorizontalRule),
            Block::Space(points) => document.push(VerticalSpace::points(f64::from(*points))),
        }
        Ok(())
    }

    /// Fixed label column; the value column takes the rest of the content width.
    fn key_value_weights(&self) -> Vec<usize> {
        let page_width = mm_to_f64(Size::from(PaperSize::A4).width);
        let content = page_width - 2.0 * mm_to_f64(pt(self.config.margin_pt));
        let key = mm_to_f64(pt(KEY_COLUMN_PT));
        // Tenths of a millimetre keep the integer weights close to the real ratio.
        let key_weight = (key * 10.0).round().max(1.0) as usize;
        let value_weight = ((content - key) * 10.0).round().max(1.0) as usize;
        vec![key_weight, value_weight]
    }

    fn key_value_grid(&self, table: &KeyValueTable) -> Result<TableLayout> {
        let padding = Margins::trbl(
            pt(KEY_PADDING_V_PT),
            pt(KEY_PADDING_H_PT),
            pt(KEY_PADDING_V_PT),
            pt(KEY_PADDING_H_PT),
        );
        let label = |text: &str| {
            ShadedCell::new([Span::new(text).bold()], KEY_PADDING_H_PT, KEY_PADDING_V_PT)
        };

        let mut layout = TableLayout::new(self.key_value_weights());
        layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));
        for (key, value) in table.rows() {
            layout
                .row()
                .element(label(key.as_str()))
                .element(Paragraph::new(value.as_str()).padded(padding))
                .push()?;
        }
        Ok(layout)
    }
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

fn paragraph(content: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in content.spans() {
        element.push(StyledString::from(span));
    }
    element.set_alignment(alignment(content.alignment()));
    element
}

fn cell_padding() -> Margins {
    Margins::trbl(
        pt(CELL_PADDING_V_PT),
        pt(CELL_PADDING_H_PT),
        pt(CELL_PADDING_V_PT),
        pt(CELL_PADDING_H_PT),
    )
}

fn grid(table: &Table) -> Result<TableLayout> {
    let mut layout = TableLayout::new(table.weights().to_vec());
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = layout.row();
    for caption in table.header() {
        header.push_element(ShadedCell::new(
            [Span::new(caption.as_str()).bold()],
            CELL_PADDING_H_PT,
            CELL_PADDING_V_PT,
        ));
    }
    header.push()?;

    for cells in table.rows() {
        let mut row = layout.row();
        for cell in cells {
            row.push_element(Paragraph::new(cell.as_str()).padded(cell_padding()));
        }
        row.push()?;
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalizationMode;
    use crate::error::Error;
    use crate::fonts::FontCandidate;

    #[test]
    fn missing_fonts_fail_construction() {
        let mut config = RenderConfig::for_mode(LocalizationMode::Plain);
        config.fonts.search_dirs = vec![PathBuf::from("/nonexistent/rirekisho-fonts")];
        config.fonts.families = vec![FontCandidate::single_file("Nothing", "nothing.ttf")];

        match Renderer::new(config) {
            Err(Error::FontsUnavailable { attempts }) => assert!(!attempts.is_empty()),
            other => panic!("expected FontsUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn invalid_margin_is_rejected_before_font_lookup() {
        let mut config = RenderConfig::default();
        config.margin_pt = -1.0;
        assert!(matches!(Renderer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn rendered_pdf_file_names() {
        let pdf = RenderedPdf {
            kind: DocumentKind::ShokumuKeirekisho,
            title: "Jane Doe".into(),
            file_name: DocumentKind::ShokumuKeirekisho.file_name("Jane Doe"),
            bytes: Vec::new(),
        };
        assert_eq!(pdf.file_name, "Jane Doe_職務経歴書.pdf");
        assert_eq!(pdf.ascii_file_name(), "jane-doe_shokumu-keirekisho.pdf");
    }
}

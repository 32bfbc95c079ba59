//! Custom `genpdf` elements used by the résumé renderer.
//!
//! `genpdf` has no fill operation, so shaded cells are painted with tightly
//! spaced hairlines before their text is drawn.  The photo frame, rules and
//! fixed-height gaps are likewise drawn with plain strokes.

use image::GenericImageView;
use log::warn;

use genpdf::elements::{Image, PaddedElement, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Margins, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const MM_PER_PT: f64 = MM_PER_INCH / 72.0;
const SHADE_STEP_MM: f64 = 0.3;
const RULE_HEIGHT_MM: f64 = 0.5;
const PHOTO_WIDTH_PT: f64 = 80.0;
const PHOTO_HEIGHT_PT: f64 = 100.0;
const PHOTO_INSET_PT: f64 = 20.0;
const PHOTO_PADDING_PT: f64 = 2.0;

/// Light gray used for header and label cells.
pub const SHADE_COLOR: Color = Color::Rgb(240, 240, 240);

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn min_mm(a: Mm, b: Mm) -> Mm {
    if a < b {
        a
    } else {
        b
    }
}

/// Converts typographic points to millimetres.
pub fn pt(value: f64) -> Mm {
    mm_from_f64(value * MM_PER_PT)
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Paints horizontal hairlines over `height` of the area.
fn shade(area: &render::Area<'_>, height: Mm, color: Color) {
    let width = area.size().width;
    let height = mm_to_f64(height);
    let style = Style::new().with_color(color);
    let mut y = 0.0;
    while y <= height {
        area.draw_line(
            vec![
                Position::new(Mm::default(), mm_from_f64(y)),
                Position::new(width, mm_from_f64(y)),
            ],
            style,
        );
        y += SHADE_STEP_MM;
    }
}

/// Padded paragraph on a light background.
///
/// The paragraph is built once and keeps its progress, so a cell whose row
/// breaks across pages continues its text on the next page instead of
/// starting over.  Shading covers the part of the text drawn on each page.
pub struct ShadedCell {
    content: PaddedElement<Paragraph>,
    spans: Vec<StyledString>,
    padding_h_pt: f64,
    padding_v_pt: f64,
    rendered: Mm,
    finished: bool,
}

impl ShadedCell {
    /// Creates a cell with `padding_h_pt` left/right and `padding_v_pt` top/bottom padding.
    pub fn new<I, S>(spans: I, padding_h_pt: f64, padding_v_pt: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StyledString>,
    {
        let spans: Vec<StyledString> = spans.into_iter().map(Into::into).collect();
        let mut paragraph = Paragraph::default();
        for span in &spans {
            paragraph.push(span.clone());
        }
        let padding = Margins::trbl(
            pt(padding_v_pt),
            pt(padding_h_pt),
            pt(padding_v_pt),
            pt(padding_h_pt),
        );

        Self {
            content: PaddedElement::new(paragraph, padding),
            spans,
            padding_h_pt,
            padding_v_pt,
            rendered: Mm::default(),
            finished: false,
        }
    }

    fn line_height(&self, context: &genpdf::Context, style: Style) -> Mm {
        let font_cache = &context.font_cache;
        self.spans
            .iter()
            .map(|span| style.and(span.style).line_height(font_cache))
            .fold(style.line_height(font_cache), Mm::max)
    }

    /// Height the padded text will need, assuming greedy wrapping.
    fn estimated_height(&self, context: &genpdf::Context, width: Mm, style: Style) -> Mm {
        let font_cache = &context.font_cache;
        let text_width: f64 = self
            .spans
            .iter()
            .map(|span| {
                let mut string = span.clone();
                string.style = style.and(string.style);
                mm_to_f64(string.width(font_cache))
            })
            .sum();

        let available = mm_to_f64(width) - 2.0 * mm_to_f64(pt(self.padding_h_pt));
        let lines = if available > f64::EPSILON {
            (text_width / available).ceil().max(1.0)
        } else {
            1.0
        };
        self.line_height(context, style) * lines + pt(2.0 * self.padding_v_pt)
    }
}

impl Element for ShadedCell {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if self.finished {
            return Ok(RenderResult::default());
        }

        // No shading where not even one padded line fits; the text moves on.
        let first_line = self.line_height(context, style) + pt(2.0 * self.padding_v_pt);
        if first_line <= area.size().height {
            let estimated = self.estimated_height(context, area.size().width, style);
            let remaining = if estimated > self.rendered {
                estimated - self.rendered
            } else {
                first_line
            };
            shade(&area, min_mm(remaining, area.size().height), SHADE_COLOR);
        }

        let result = self.content.render(context, area, style)?;
        self.rendered += result.size.height;
        self.finished = !result.has_more;
        Ok(result)
    }
}

/// Framed box for the applicant's photo, right-aligned on the line.
///
/// Shows the decoded photo scaled to fit, or a centred caption when there is
/// no usable image.
pub struct PhotoFrame {
    caption: String,
    image: Option<image::DynamicImage>,
}

impl PhotoFrame {
    /// Creates the frame; undecodable image bytes fall back to the caption.
    pub fn new(caption: impl Into<String>, image: Option<&[u8]>) -> Self {
        let image = image.and_then(|bytes| match decode_image_from_bytes(bytes) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("Ignoring photo that could not be decoded: {err}");
                None
            }
        });
        Self {
            caption: caption.into(),
            image,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    fn render_image(
        &self,
        image: &image::DynamicImage,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<(), Error> {
        let natural = estimated_image_size(image, DEFAULT_IMAGE_DPI);
        let natural_width = mm_to_f64(natural.width);
        let natural_height = mm_to_f64(natural.height);
        if natural_width <= f64::EPSILON || natural_height <= f64::EPSILON {
            return Ok(());
        }

        let max_width = mm_to_f64(pt(PHOTO_WIDTH_PT - 2.0 * PHOTO_PADDING_PT));
        let max_height = mm_to_f64(pt(PHOTO_HEIGHT_PT - 2.0 * PHOTO_PADDING_PT));
        let scale = (max_width / natural_width).min(max_height / natural_height);
        let offset_x = (max_width - natural_width * scale) / 2.0;
        let offset_y = (max_height - natural_height * scale) / 2.0;

        let mut element = Image::from_dynamic_image(image.clone())?;
        element.set_scale(Scale::new(scale, scale));

        let mut image_area = area;
        image_area.add_offset(Position::new(
            pt(PHOTO_PADDING_PT) + mm_from_f64(offset_x),
            pt(PHOTO_PADDING_PT) + mm_from_f64(offset_y),
        ));
        element.render(context, image_area, style)?;
        Ok(())
    }

    fn render_caption(
        &self,
        context: &genpdf::Context,
        area: &render::Area<'_>,
        style: Style,
    ) -> Result<(), Error> {
        let caption = StyledString::new(self.caption.clone(), style);
        let width = caption.width(&context.font_cache);
        let line_height = style.line_height(&context.font_cache);
        let position = Position::new(
            (pt(PHOTO_WIDTH_PT) - width) / 2.0,
            (pt(PHOTO_HEIGHT_PT) - line_height) / 2.0,
        );
        if let Some(mut section) = area.text_section(&context.font_cache, position, style) {
            section.print_str(&caption.s, style)?;
        }
        Ok(())
    }
}

impl Element for PhotoFrame {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let box_width = pt(PHOTO_WIDTH_PT);
        let box_height = pt(PHOTO_HEIGHT_PT);
        let available = area.size();

        let mut result = RenderResult::default();
        if box_height > available.height {
            result.has_more = true;
            return Ok(result);
        }

        let left = (available.width - box_width - pt(PHOTO_INSET_PT)).max(Mm::default());
        area.add_offset(Position::new(left, 0));
        area.draw_line(
            vec![
                Position::new(0, 0),
                Position::new(box_width, Mm::default()),
                Position::new(box_width, box_height),
                Position::new(Mm::default(), box_height),
                Position::new(0, 0),
            ],
            Style::new(),
        );

        match &self.image {
            Some(image) => self.render_image(image, context, area.clone(), style)?,
            None => self.render_caption(context, &area, style)?,
        }

        result.size = Size::new(available.width, box_height);
        Ok(result)
    }
}

/// Thin line across the full content width.
#[derive(Clone, Copy, Debug, Default)]
pub struct HorizontalRule;

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let height = mm_from_f64(RULE_HEIGHT_MM);
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        let mut line_style = Style::new();
        if let Some(color) = style.color() {
            line_style = line_style.with_color(color);
        }
        area.draw_line(
            vec![Position::new(0, 0), Position::new(width, Mm::default())],
            line_style,
        );
        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Fixed vertical gap; truncated at the bottom of the page instead of carrying over.
#[derive(Clone, Copy, Debug)]
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }

    /// Gap of `value` points.
    pub fn points(value: f64) -> Self {
        Self::new(pt(value))
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        result.size = Size::new(0, min_mm(self.height, area.size().height));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_to_millimetres() {
        assert!((mm_to_f64(pt(72.0)) - 25.4).abs() < 1e-9);
        assert!((mm_to_f64(pt(30.0)) - 10.583_333).abs() < 1e-5);
    }

    #[test]
    fn image_size_is_estimated_at_default_dpi() {
        let image = image::DynamicImage::new_rgb8(300, 600);
        let size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
        assert!((mm_to_f64(size.width) - 25.4).abs() < 1e-9);
        assert!((mm_to_f64(size.height) - 50.8).abs() < 1e-9);
    }

    #[test]
    fn undecodable_photo_falls_back_to_caption() {
        let frame = PhotoFrame::new("Photo", Some(b"definitely not an image".as_slice()));
        assert!(!frame.has_image());
        assert!(!PhotoFrame::new("Photo", None).has_image());
    }

    #[test]
    fn decodes_png_photo() {
        let mut bytes = Vec::new();
        image::DynamicImage::new_rgb8(4, 5)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .expect("encode png");
        assert!(PhotoFrame::new("Photo", Some(&bytes)).has_image());
    }
}

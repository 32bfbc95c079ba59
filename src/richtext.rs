//! Styled text fragments used by the layout model.
//!
//! A [`Span`] is a piece of text with the handful of inline attributes the
//! résumé layouts need (weight and size).  Conversion into `genpdf`
//! styles happens only at render time so the layout model stays backend-free.

use genpdf::style::{Style, StyledString};

/// Body text size in points.
pub const BODY_SIZE: u8 = 12;

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    size: u8,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            text: String::new(),
            bold: false,
            size: BODY_SIZE,
        }
    }
}

impl Span {
    /// Creates a new span with the provided text in body style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Font size in points.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Sets the font size in points.
    pub fn sized(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Builds the `genpdf` style for the span.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        style.set_font_size(self.size);
        if self.bold {
            style.set_bold();
        }
        style
    }

    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

impl From<Span> for StyledString {
    fn from(span: Span) -> Self {
        span.to_styled_string()
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Span::new(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Span::new(text)
    }
}

//! Japanese résumé documents as PDFs.
//!
//! A [`Resume`] is projected into two immutable document trees, the
//! rirekisho ([`build_basic`]) and the shokumu-keirekisho
//! ([`build_detailed`]), which a [`Renderer`] lays out on A4 pages with
//! `genpdf`.

pub mod builder;
pub mod config;
pub mod document;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod heuristics;
pub mod layout;
pub mod localize;
pub mod metadata;
pub mod model;
pub mod render;
pub mod resume;
pub mod richtext;
pub mod sanitize;

pub use config::{LocalizationMode, RenderConfig};
pub use document::{DocumentKind, DocumentTree};
pub use error::{Error, Result};
pub use generator::{build_basic, build_detailed};
pub use heuristics::{determine_skill_level, extract_achievements, extract_technologies, SkillLevel};
pub use render::{RenderedPdf, Renderer};
pub use resume::Resume;
pub use sanitize::sanitize_for_pdf;

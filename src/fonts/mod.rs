//! Font resolution for the renderer.
//!
//! A [`FontConfig`](crate::config::FontConfig) lists font families in order of
//! preference.  Every family is tried against every search directory; the first
//! combination whose files load is used and the remaining ones are ignored.
//! Families that fail to load are skipped quietly and only reported when the
//! whole chain is exhausted.

use std::env;
use std::path::{Path, PathBuf};

use genpdf::error::Error as PdfError;
use genpdf::fonts::{FontData, FontFamily};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::FontConfig;
use crate::error::{Error, Result};

/// Base-14 fonts that a family can be mapped onto.
///
/// Families backed by a built-in font only use their TTF files for metrics; the
/// PDF references the viewer's built-in font and nothing is embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinFont {
    Times,
    Helvetica,
    Courier,
}

/// The four styles of a font family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl BuiltinFont {
    /// The printpdf font that stands in for `style` of this family.
    pub fn pdf_font(self, style: FontStyle) -> printpdf::BuiltinFont {
        use printpdf::BuiltinFont as Pdf;

        match (self, style) {
            (BuiltinFont::Times, FontStyle::Regular) => Pdf::TimesRoman,
            (BuiltinFont::Times, FontStyle::Bold) => Pdf::TimesBold,
            (BuiltinFont::Times, FontStyle::Italic) => Pdf::TimesItalic,
            (BuiltinFont::Times, FontStyle::BoldItalic) => Pdf::TimesBoldItalic,
            (BuiltinFont::Helvetica, FontStyle::Regular) => Pdf::Helvetica,
            (BuiltinFont::Helvetica, FontStyle::Bold) => Pdf::HelveticaBold,
            (BuiltinFont::Helvetica, FontStyle::Italic) => Pdf::HelveticaOblique,
            (BuiltinFont::Helvetica, FontStyle::BoldItalic) => Pdf::HelveticaBoldOblique,
            (BuiltinFont::Courier, FontStyle::Regular) => Pdf::Courier,
            (BuiltinFont::Courier, FontStyle::Bold) => Pdf::CourierBold,
            (BuiltinFont::Courier, FontStyle::Italic) => Pdf::CourierOblique,
            (BuiltinFont::Courier, FontStyle::BoldItalic) => Pdf::CourierBoldOblique,
        }
    }
}

/// One entry of the font fallback chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCandidate {
    /// Display name used in logs and error messages.
    pub name: String,
    /// Regular style file name; required.
    pub regular: String,
    #[serde(default)]
    pub bold: Option<String>,
    #[serde(default)]
    pub italic: Option<String>,
    #[serde(default)]
    pub bold_italic: Option<String>,
    #[serde(default)]
    pub builtin: Option<BuiltinFont>,
}

impl FontCandidate {
    /// Candidate following the `<stem>-Regular.ttf`/`-Bold`/`-Italic`/`-BoldItalic` naming scheme.
    pub fn from_stem(name: impl Into<String>, stem: &str, builtin: Option<BuiltinFont>) -> Self {
        Self {
            name: name.into(),
            regular: format!("{stem}-Regular.ttf"),
            bold: Some(format!("{stem}-Bold.ttf")),
            italic: Some(format!("{stem}-Italic.ttf")),
            bold_italic: Some(format!("{stem}-BoldItalic.ttf")),
            builtin,
        }
    }

    /// Candidate consisting of a single file used for every style.
    pub fn single_file(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regular: file.into(),
            bold: None,
            italic: None,
            bold_italic: None,
            builtin: None,
        }
    }
}

/// The default chain for ASCII output: Times-Roman, Helvetica, Courier.
///
/// The metric files are the Liberation families, which are metric compatible
/// with the corresponding base-14 fonts.
pub fn base14_candidates() -> Vec<FontCandidate> {
    vec![
        FontCandidate::from_stem("Times-Roman", "LiberationSerif", Some(BuiltinFont::Times)),
        FontCandidate::from_stem("Helvetica", "LiberationSans", Some(BuiltinFont::Helvetica)),
        FontCandidate::from_stem("Courier", "LiberationMono", Some(BuiltinFont::Courier)),
    ]
}

/// The chain used for Japanese output; these fonts are embedded.
pub fn japanese_candidates() -> Vec<FontCandidate> {
    vec![
        FontCandidate {
            name: "Noto Sans JP".to_owned(),
            regular: "NotoSansJP-Regular.ttf".to_owned(),
            bold: Some("NotoSansJP-Bold.ttf".to_owned()),
            italic: None,
            bold_italic: None,
            builtin: None,
        },
        FontCandidate::single_file("IPAexGothic", "ipaexg.ttf"),
    ]
}

/// Directories searched when no explicit directory is configured.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            candidates.push(bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    for system_dir in [
        "/usr/share/fonts/truetype/liberation",
        "/usr/share/fonts/truetype/liberation2",
        "/usr/share/fonts/liberation",
        "/usr/share/fonts/opentype/ipaexfont-gothic",
        "/usr/share/fonts/truetype/noto",
        "/Library/Fonts",
    ] {
        push_unique(&mut candidates, PathBuf::from(system_dir));
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env::var_os(var) {
                push_unique(&mut candidates, PathBuf::from(root).join("Fonts"));
            }
        }
    }

    candidates
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

/// A font family that loaded successfully, with its origin.
#[derive(Clone, Debug)]
pub struct ResolvedFontFamily {
    pub name: String,
    pub directory: PathBuf,
    pub family: FontFamily<FontData>,
}

fn load_style(
    directory: &Path,
    file: &str,
    builtin: Option<BuiltinFont>,
    style: FontStyle,
) -> std::result::Result<FontData, String> {
    let path = directory.join(file);
    if !path.is_file() {
        return Err(format!("missing {}", path.display()));
    }
    FontData::load(&path, builtin.map(|font| font.pdf_font(style)))
        .map_err(|err: PdfError| format!("rejected {}: {}", path.display(), err))
}

fn load_candidate(
    directory: &Path,
    candidate: &FontCandidate,
) -> std::result::Result<FontFamily<FontData>, String> {
    // A style without its own file reuses the regular metrics but keeps its
    // own built-in face, so bold text is still bold in the PDF.
    let load = |file: &Option<String>, style: FontStyle| {
        let file = file.as_deref().unwrap_or(&candidate.regular);
        load_style(directory, file, candidate.builtin, style)
    };

    let regular = load_style(directory, &candidate.regular, candidate.builtin, FontStyle::Regular)?;
    let bold = load(&candidate.bold, FontStyle::Bold)?;
    let italic = load(&candidate.italic, FontStyle::Italic)?;
    let bold_italic_file = candidate.bold_italic.as_ref().or(candidate.bold.as_ref()).cloned();
    let bold_italic = load(&bold_italic_file, FontStyle::BoldItalic)?;

    Ok(FontFamily {
        regular,
        bold,
        italic,
        bold_italic,
    })
}

/// Walks the fallback chain and returns the first family that loads.
pub fn resolve_font_family(config: &FontConfig) -> Result<ResolvedFontFamily> {
    let mut attempts = Vec::new();

    for candidate in &config.families {
        for directory in &config.search_dirs {
            if !directory.is_dir() {
                continue;
            }
            match load_candidate(directory, candidate) {
                Ok(family) => {
                    debug!(
                        "Using font family '{}' from {}",
                        candidate.name,
                        directory.display()
                    );
                    return Ok(ResolvedFontFamily {
                        name: candidate.name.clone(),
                        directory: directory.clone(),
                        family,
                    });
                }
                Err(reason) => {
                    debug!("Skipping font family '{}': {}", candidate.name, reason);
                    attempts.push(format!("{} ({})", candidate.name, reason));
                }
            }
        }
    }

    if attempts.is_empty() {
        attempts.push("no existing search directories".to_owned());
    }

    Err(Error::FontsUnavailable { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_candidate_uses_conventional_names() {
        let candidate = FontCandidate::from_stem("Helvetica", "LiberationSans", None);
        assert_eq!(candidate.regular, "LiberationSans-Regular.ttf");
        assert_eq!(candidate.bold_italic.as_deref(), Some("LiberationSans-BoldItalic.ttf"));
    }

    #[test]
    fn base14_chain_order_is_fixed() {
        let names: Vec<_> = base14_candidates().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Times-Roman", "Helvetica", "Courier"]);
    }

    #[test]
    fn exhausted_chain_reports_every_attempt() {
        let dir = env::temp_dir().join("rirekisho-empty-font-dir");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let config = FontConfig {
            search_dirs: vec![dir, PathBuf::from("/__rirekisho_missing_fonts__")],
            families: base14_candidates(),
        };

        match resolve_font_family(&config) {
            Err(Error::FontsUnavailable { attempts }) => {
                assert_eq!(attempts.len(), 3);
                assert!(attempts[0].starts_with("Times-Roman (missing"));
                assert!(attempts[2].starts_with("Courier"));
            }
            other => panic!("expected FontsUnavailable, got {:?}", other.map(|f| f.name)),
        }
    }

    #[test]
    fn no_directories_is_still_an_error() {
        let config = FontConfig {
            search_dirs: Vec::new(),
            families: base14_candidates(),
        };
        match resolve_font_family(&config) {
            Err(Error::FontsUnavailable { attempts }) => {
                assert_eq!(attempts, ["no existing search directories"]);
            }
            other => panic!("expected FontsUnavailable, got {:?}", other.map(|f| f.name)),
        }
    }

    #[test]
    fn builtin_families_map_every_style_to_a_base14_face() {
        use printpdf::BuiltinFont as Pdf;

        assert_eq!(BuiltinFont::Times.pdf_font(FontStyle::Regular), Pdf::TimesRoman);
        assert_eq!(BuiltinFont::Times.pdf_font(FontStyle::BoldItalic), Pdf::TimesBoldItalic);
        assert_eq!(BuiltinFont::Helvetica.pdf_font(FontStyle::Bold), Pdf::HelveticaBold);
        assert_eq!(BuiltinFont::Helvetica.pdf_font(FontStyle::Italic), Pdf::HelveticaOblique);
        assert_eq!(BuiltinFont::Courier.pdf_font(FontStyle::Regular), Pdf::Courier);
        assert_eq!(BuiltinFont::Courier.pdf_font(FontStyle::Bold), Pdf::CourierBold);
    }
}

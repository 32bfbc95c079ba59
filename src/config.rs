//! Render configuration: localization mode, page geometry and font search setup.
//!
//! Defaults are chosen per [`LocalizationMode`]; environment variables and a
//! JSON config file can be layered on top.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fonts::{self, FontCandidate};

/// Environment variable holding an extra font directory searched first.
pub const FONTS_DIR_ENV: &str = "RIREKISHO_FONTS_DIR";

/// Environment variable selecting the localization mode (`plain` or `japanese`).
pub const MODE_ENV: &str = "RIREKISHO_MODE";

/// Uniform page margin in points (A4, 30pt on every side).
pub const DEFAULT_MARGIN_PT: f64 = 30.0;

/// Target language of display strings and date formatting.
///
/// `Plain` is the supported contract: everything ends up ASCII-safe for the
/// base-14 fonts.  `Japanese` is kept as a legacy mode; it needs a CJK font on
/// the host and is not sanitized by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalizationMode {
    #[default]
    Plain,
    Japanese,
}

impl LocalizationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Japanese => "japanese",
        }
    }
}

impl fmt::Display for LocalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocalizationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "english" | "ascii" => Ok(Self::Plain),
            "japanese" | "ja" => Ok(Self::Japanese),
            other => Err(Error::Config(format!(
                "unknown localization mode '{other}' (expected 'plain' or 'japanese')"
            ))),
        }
    }
}

/// Where to look for fonts and which families to try, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub search_dirs: Vec<PathBuf>,
    pub families: Vec<FontCandidate>,
}

impl FontConfig {
    /// Default search directories and family chain for the given mode.
    pub fn for_mode(mode: LocalizationMode) -> Self {
        let families = match mode {
            LocalizationMode::Plain => fonts::base14_candidates(),
            LocalizationMode::Japanese => fonts::japanese_candidates(),
        };
        Self {
            search_dirs: fonts::default_search_dirs(),
            families,
        }
    }

    /// Puts `dir` in front of the search list unless it is already present.
    pub fn prepend_search_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.search_dirs.retain(|existing| existing != &dir);
        self.search_dirs.insert(0, dir);
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::for_mode(LocalizationMode::default())
    }
}

/// Complete renderer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: LocalizationMode,
    /// Margin applied to all four page edges, in points.
    pub margin_pt: f64,
    /// Forces sanitization on or off; `None` follows the mode default.
    pub sanitize: Option<bool>,
    /// Prints a page number footer on every page.
    pub page_numbers: bool,
    /// Date printed in the generation stamp; `None` uses today's local date.
    pub generated_on: Option<NaiveDate>,
    pub fonts: FontConfig,
}

impl RenderConfig {
    /// Mode-specific defaults.
    pub fn for_mode(mode: LocalizationMode) -> Self {
        Self {
            mode,
            margin_pt: DEFAULT_MARGIN_PT,
            sanitize: None,
            page_numbers: false,
            generated_on: None,
            fonts: FontConfig::for_mode(mode),
        }
    }

    /// Defaults adjusted by `RIREKISHO_MODE` and `RIREKISHO_FONTS_DIR`.
    pub fn from_env() -> Result<Self> {
        let mode = match env::var(MODE_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => LocalizationMode::default(),
        };
        let mut config = Self::for_mode(mode);
        config.apply_env_fonts_dir();
        Ok(config)
    }

    /// Parses a JSON config; missing fields take the defaults of the configured mode.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mode = match value.get("mode") {
            Some(mode) => serde_json::from_value(mode.clone())?,
            None => LocalizationMode::default(),
        };

        let mut merged = serde_json::to_value(Self::for_mode(mode))?;
        if let (Some(base), serde_json::Value::Object(overrides)) = (merged.as_object_mut(), value)
        {
            for (key, entry) in overrides {
                base.insert(key, entry);
            }
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Switches the mode and resets the font chain to that mode's defaults,
    /// keeping any extra search directories.
    pub fn with_mode(mut self, mode: LocalizationMode) -> Self {
        if self.mode != mode {
            let dirs = self.fonts.search_dirs.clone();
            self.mode = mode;
            self.fonts = FontConfig::for_mode(mode);
            for dir in dirs.into_iter().rev() {
                self.fonts.prepend_search_dir(dir);
            }
        }
        self
    }

    pub fn with_generated_on(mut self, date: impl Into<Option<NaiveDate>>) -> Self {
        self.generated_on = date.into();
        self
    }

    pub fn with_sanitize(mut self, sanitize: impl Into<Option<bool>>) -> Self {
        self.sanitize = sanitize.into();
        self
    }

    pub fn with_page_numbers(mut self, page_numbers: bool) -> Self {
        self.page_numbers = page_numbers;
        self
    }

    /// Whether user text is passed through [`crate::sanitize::sanitize_for_pdf`].
    pub fn sanitize_enabled(&self) -> bool {
        self.sanitize.unwrap_or(self.mode == LocalizationMode::Plain)
    }

    /// Rejects values the page layout cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=200.0).contains(&self.margin_pt) {
            return Err(Error::Config(format!(
                "margin_pt must be between 0 and 200, got {}",
                self.margin_pt
            )));
        }
        if self.fonts.families.is_empty() {
            return Err(Error::Config("at least one font family is required".into()));
        }
        Ok(())
    }

    fn apply_env_fonts_dir(&mut self) {
        if let Ok(path) = env::var(FONTS_DIR_ENV) {
            if !path.trim().is_empty() {
                self.fonts.prepend_search_dir(path);
            }
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_mode(LocalizationMode::default())
    }
}

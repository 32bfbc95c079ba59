//! Document trees: localized, presentation-ready snapshots of a résumé.
//!
//! A tree owns all of its data and never points back at the [`Resume`] it was
//! built from, so it can be serialized, cloned across threads or cached freely.
//! Collection order is the source order and is also the rendering order.
//!
//! [`Resume`]: crate::resume::Resume

use serde::{Deserialize, Serialize};

/// The two document types produced for every résumé.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Basic chronological résumé.
    Rirekisho,
    /// Detailed career history.
    ShokumuKeirekisho,
}

impl DocumentKind {
    /// Japanese document name used in file names.
    pub fn japanese_name(self) -> &'static str {
        match self {
            Self::Rirekisho => "履歴書",
            Self::ShokumuKeirekisho => "職務経歴書",
        }
    }

    /// ASCII identifier of the document type.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Rirekisho => "rirekisho",
            Self::ShokumuKeirekisho => "shokumu-keirekisho",
        }
    }

    /// Conventional UTF-8 file name, e.g. `Jane Doe_履歴書.pdf`.
    pub fn file_name(self, title: &str) -> String {
        format!("{}_{}.pdf", title, self.japanese_name())
    }

    /// ASCII-only file name for storage that cannot hold UTF-8 names.
    pub fn ascii_file_name(self, title: &str) -> String {
        let stem = slug::slugify(title);
        if stem.is_empty() {
            format!("{}.pdf", self.slug())
        } else {
            format!("{}_{}.pdf", stem, self.slug())
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub summary: String,
    /// Photo bytes copied from the résumé, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school_name: String,
    pub institution_type: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

/// Experience entry of the career history, with extracted highlights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedExperienceEntry {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub completion_date: String,
}

/// Content of a rirekisho.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rirekisho {
    pub basic_info: BasicInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillEntry>,
    pub certifications: Vec<CertificationEntry>,
}

/// Content of a shokumu-keirekisho.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShokumuKeirekisho {
    pub basic_info: BasicInfo,
    pub experience: Vec<DetailedExperienceEntry>,
    pub skills: Vec<SkillEntry>,
    pub certifications: Vec<CertificationEntry>,
}

/// A finished document tree of either kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentTree {
    Rirekisho(Rirekisho),
    ShokumuKeirekisho(ShokumuKeirekisho),
}

impl DocumentTree {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Rirekisho(_) => DocumentKind::Rirekisho,
            Self::ShokumuKeirekisho(_) => DocumentKind::ShokumuKeirekisho,
        }
    }

    pub fn basic_info(&self) -> &BasicInfo {
        match self {
            Self::Rirekisho(doc) => &doc.basic_info,
            Self::ShokumuKeirekisho(doc) => &doc.basic_info,
        }
    }
}

impl From<Rirekisho> for DocumentTree {
    fn from(doc: Rirekisho) -> Self {
        Self::Rirekisho(doc)
    }
}

impl From<ShokumuKeirekisho> for DocumentTree {
    fn from(doc: ShokumuKeirekisho) -> Self {
        Self::ShokumuKeirekisho(doc)
    }
}

//! The read-only résumé aggregate consumed by the document generators.
//!
//! Persistence and validation live elsewhere; these types only describe the
//! shape of a record as it arrives (usually as JSON).  Every field except the
//! title may be missing and must be tolerated downstream.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date-like field: either a real calendar date or free text such as `"2021-09"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// A full calendar date (`YYYY-MM-DD` in JSON).
    Date(NaiveDate),
    /// Any other textual value.
    Text(String),
}

impl DateValue {
    /// Creates a textual date value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` when the value carries no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Date(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Top-level résumé record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Raw photo bytes attached by the caller; never part of the JSON form.
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
}

impl Resume {
    /// Creates an otherwise empty résumé with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parses a résumé from its JSON representation.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school_name: Option<String>,
    pub institution_type: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<DateValue>,
    pub end_date: Option<DateValue>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<DateValue>,
    pub end_date: Option<DateValue>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub completion_date: Option<DateValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_date_forms() {
        let resume = Resume::from_json_str(
            r#"{
                "title": "Jane Doe",
                "experiences": [
                    {"company_name": "Acme", "start_date": "2020-01", "end_date": "2022-06-01"}
                ],
                "certifications": [{"name": "AWS SAA", "completion_date": null}]
            }"#,
        )
        .expect("valid resume json");

        let experience = &resume.experiences[0];
        assert_eq!(experience.start_date, Some(DateValue::text("2020-01")));
        assert_eq!(
            experience.end_date,
            Some(DateValue::Date(NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()))
        );
        assert!(resume.certifications[0].completion_date.is_none());
        assert!(resume.educations.is_empty());
        assert!(resume.summary.is_none());
    }

    #[test]
    fn date_display_uses_literal_form() {
        let date = DateValue::from(NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());
        assert_eq!(date.to_string(), "2021-09-01");
        assert_eq!(DateValue::from("spring 2020").to_string(), "spring 2020");
        assert!(DateValue::from("   ").is_blank());
    }
}

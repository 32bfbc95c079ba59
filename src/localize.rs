//! Static localization tables and the per-field transforms built on them.
//!
//! Every transform is total: a lookup miss or an unrecognised date returns the
//! input unchanged, so nothing here can fail.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LocalizationMode;
use crate::resume::DateValue;

/// Shown instead of an address that the ASCII-only renderer cannot print.
pub const ADDRESS_PLACEHOLDER: &str = "Address provided (Japanese characters not shown in PDF)";

static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})$").expect("valid year-month pattern"));

const PLAIN_TERMS: &[(&str, &str)] = &[
    ("undergraduate", "Undergraduate"),
    ("graduate", "Graduate"),
    ("vocational", "Vocational School"),
    ("high_school", "High School"),
    ("community_college", "Community College"),
    ("technical", "Technical Institute"),
    ("language_school", "Language School"),
    ("other", "Other"),
];

const JAPANESE_TERMS: &[(&str, &str)] = &[
    // institution types
    ("undergraduate", "学部"),
    ("graduate", "大学院"),
    ("vocational", "専門学校"),
    ("high_school", "高等学校"),
    ("community_college", "短期大学"),
    ("technical", "高等専門学校"),
    ("language_school", "語学学校"),
    ("other", "その他"),
    // degrees
    ("Bachelor of Science", "学士（理学）"),
    ("Bachelor of Arts", "学士（文学）"),
    ("Master of Science", "修士（理学）"),
    ("Master of Arts", "修士（文学）"),
    ("PhD", "博士"),
    // fields
    ("Computer Science", "情報科学"),
    ("Engineering", "工学"),
    ("Business", "経営学"),
    ("Economics", "経済学"),
    // job titles
    ("Software Engineer", "ソフトウェアエンジニア"),
    ("Developer", "開発者"),
    ("Programmer", "プログラマー"),
    ("Manager", "マネージャー"),
    ("Director", "ディレクター"),
    // skills
    ("Project Management", "プロジェクト管理"),
    ("Japanese", "日本語"),
    ("English", "英語"),
];

/// Phrase swaps for free text in Japanese mode.
///
/// Applied top to bottom with plain substring replacement; entries further
/// down see the output of earlier ones, so the order is part of the contract.
const JAPANESE_PHRASES: &[(&str, &str)] = &[
    ("Tokyo", "東京都"),
    ("Osaka", "大阪府"),
    ("Kyoto", "京都府"),
    (" Prefecture", "県"),
    (" City", "市"),
    (" Ward", "区"),
    ("Japan", "日本"),
    ("Software Engineer", "ソフトウェアエンジニア"),
    ("software engineer", "ソフトウェアエンジニア"),
    ("experienced", "経験豊富な"),
    ("Experienced", "経験豊富な"),
    ("developer", "開発者"),
    ("Developer", "開発者"),
    ("engineer", "エンジニア"),
    ("Engineer", "エンジニア"),
    ("project management", "プロジェクト管理"),
    ("team lead", "チームリーダー"),
    ("years of experience", "年の経験"),
];

static PLAIN_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PLAIN_TERMS.iter().copied().collect());

static JAPANESE_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| JAPANESE_TERMS.iter().copied().collect());

fn table(mode: LocalizationMode) -> &'static HashMap<&'static str, &'static str> {
    match mode {
        LocalizationMode::Plain => &PLAIN_TABLE,
        LocalizationMode::Japanese => &JAPANESE_TABLE,
    }
}

/// Looks up the display string for a canonical term, returning the input on a miss.
pub fn translate_term(term: &str, mode: LocalizationMode) -> String {
    table(mode)
        .get(term)
        .map(|display| (*display).to_owned())
        .unwrap_or_else(|| term.to_owned())
}

/// [`translate_term`] for optional fields; absent values become the empty string.
pub fn translate_optional(term: Option<&str>, mode: LocalizationMode) -> String {
    term.map(|term| translate_term(term, mode)).unwrap_or_default()
}

/// Formats a textual date.
///
/// `YYYY-MM` is rendered per mode, blank input becomes `""` and anything else
/// is returned verbatim.
pub fn format_date_str(value: &str, mode: LocalizationMode) -> String {
    if value.trim().is_empty() {
        return String::new();
    }

    match YEAR_MONTH.captures(value) {
        Some(parts) => {
            let (year, month) = (&parts[1], &parts[2]);
            match mode {
                LocalizationMode::Plain => format!("{year}-{month}"),
                LocalizationMode::Japanese => format!("{year}年{month}月"),
            }
        }
        None => value.to_owned(),
    }
}

/// Formats an optional [`DateValue`]; full dates fall back to their literal form.
pub fn format_date(value: Option<&DateValue>, mode: LocalizationMode) -> String {
    match value {
        None => String::new(),
        Some(DateValue::Text(text)) => format_date_str(text, mode),
        Some(date @ DateValue::Date(_)) => date.to_string(),
    }
}

/// Applies the ordered Japanese phrase list to `text`.
pub fn substitute_phrases(text: &str) -> String {
    JAPANESE_PHRASES
        .iter()
        .fold(text.to_owned(), |acc, (from, to)| acc.replace(from, to))
}

/// Localizes an address.
///
/// In plain mode any non-ASCII address is swapped for [`ADDRESS_PLACEHOLDER`].
pub fn localize_address(address: Option<&str>, mode: LocalizationMode) -> String {
    let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
        return String::new();
    };

    match mode {
        LocalizationMode::Plain if !address.is_ascii() => ADDRESS_PLACEHOLDER.to_owned(),
        LocalizationMode::Plain => address.to_owned(),
        LocalizationMode::Japanese => substitute_phrases(address),
    }
}

/// Localizes free text such as the summary or a description.
pub fn localize_text(text: Option<&str>, mode: LocalizationMode) -> String {
    let text = text.unwrap_or_default();
    match mode {
        LocalizationMode::Plain => text.to_owned(),
        LocalizationMode::Japanese => substitute_phrases(text),
    }
}

/// Fixed captions used by the PDF layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Labels {
    pub rirekisho_title: &'static str,
    pub shokumu_title: &'static str,
    pub photo: &'static str,
    pub personal_information: &'static str,
    pub basic_information: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub date_of_birth: &'static str,
    pub gender: &'static str,
    pub email: &'static str,
    pub education: &'static str,
    pub period: &'static str,
    pub school_name: &'static str,
    pub degree_major: &'static str,
    pub work_experience: &'static str,
    pub company_name: &'static str,
    pub position: &'static str,
    pub skills_and_certifications: &'static str,
    pub skills: &'static str,
    pub skill_name: &'static str,
    pub level: &'static str,
    pub certifications: &'static str,
    pub certification_name: &'static str,
    pub completion_date: &'static str,
    pub self_pr: &'static str,
    pub career_summary: &'static str,
    pub period_prefix: &'static str,
    pub position_prefix: &'static str,
    pub job_description: &'static str,
    pub achievements: &'static str,
    pub technologies: &'static str,
    pub no_experience: &'static str,
    pub created: &'static str,
    pub created_date_format: &'static str,
    pub page: &'static str,
}

const PLAIN_LABELS: Labels = Labels {
    rirekisho_title: "Rirekisho (Resume)",
    shokumu_title: "Shokumu Keirekisho (Job History)",
    photo: "Photo",
    personal_information: "Personal Information",
    basic_information: "Basic Information",
    name: "Name",
    address: "Address",
    phone: "Phone",
    date_of_birth: "Date of Birth",
    gender: "Gender",
    email: "Email",
    education: "Education",
    period: "Period",
    school_name: "School Name",
    degree_major: "Degree/Major",
    work_experience: "Work Experience",
    company_name: "Company Name",
    position: "Position",
    skills_and_certifications: "Skills & Certifications",
    skills: "Skills",
    skill_name: "Skill Name",
    level: "Level",
    certifications: "Certifications",
    certification_name: "Certification Name",
    completion_date: "Completion Date",
    self_pr: "Self-PR",
    career_summary: "Career Summary",
    period_prefix: "Period:",
    position_prefix: "Position:",
    job_description: "Job Description:",
    achievements: "Achievements:",
    technologies: "Technologies:",
    no_experience: "No work experience available",
    created: "Created:",
    created_date_format: "%Y-%m-%d",
    page: "Page",
};

const JAPANESE_LABELS: Labels = Labels {
    rirekisho_title: "履歴書",
    shokumu_title: "職務経歴書",
    photo: "写真",
    personal_information: "個人情報",
    basic_information: "基本情報",
    name: "氏名",
    address: "住所",
    phone: "電話番号",
    date_of_birth: "生年月日",
    gender: "性別",
    email: "メール",
    education: "学歴",
    period: "期間",
    school_name: "学校名",
    degree_major: "学位・専攻",
    work_experience: "職歴",
    company_name: "会社名",
    position: "役職",
    skills_and_certifications: "スキル・資格",
    skills: "スキル",
    skill_name: "スキル名",
    level: "レベル",
    certifications: "資格",
    certification_name: "資格名",
    completion_date: "取得日",
    self_pr: "自己PR",
    career_summary: "職務要約",
    period_prefix: "期間:",
    position_prefix: "役職:",
    job_description: "業務内容:",
    achievements: "実績:",
    technologies: "使用技術:",
    no_experience: "職歴はありません",
    created: "作成日:",
    created_date_format: "%Y年%m月%d日",
    page: "ページ",
};

impl Labels {
    pub fn for_mode(mode: LocalizationMode) -> &'static Labels {
        match mode {
            LocalizationMode::Plain => &PLAIN_LABELS,
            LocalizationMode::Japanese => &JAPANESE_LABELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use LocalizationMode::{Japanese, Plain};

    #[test]
    fn year_month_formats_per_mode() {
        assert_eq!(format_date_str("2021-09", Japanese), "2021年09月");
        assert_eq!(format_date_str("2021-09", Plain), "2021-09");
    }

    #[test]
    fn blank_and_missing_dates_are_empty() {
        for mode in [Plain, Japanese] {
            assert_eq!(format_date(None, mode), "");
            assert_eq!(format_date(Some(&DateValue::text("")), mode), "");
            assert_eq!(format_date(Some(&DateValue::text("  ")), mode), "");
        }
    }

    #[test]
    fn other_dates_keep_their_literal_form() {
        let full = DateValue::Date(NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
        assert_eq!(format_date(Some(&full), Japanese), "2020-04-01");
        assert_eq!(format_date_str("2021-9", Japanese), "2021-9");
        assert_eq!(format_date_str("present", Plain), "present");
    }

    #[test]
    fn lookup_miss_returns_input() {
        assert_eq!(translate_term("Astrophysics", Japanese), "Astrophysics");
        assert_eq!(translate_term("Developer", Plain), "Developer");
        assert_eq!(translate_term("high_school", Plain), "High School");
        assert_eq!(translate_term("high_school", Japanese), "高等学校");
        assert_eq!(translate_optional(None, Japanese), "");
    }

    #[test]
    fn plain_address_redacts_non_ascii() {
        assert_eq!(
            localize_address(Some("東京都渋谷区"), Plain),
            ADDRESS_PLACEHOLDER
        );
        assert_eq!(localize_address(Some("1-2-3 Shibuya"), Plain), "1-2-3 Shibuya");
        assert_eq!(localize_address(None, Plain), "");
        assert_eq!(localize_address(Some(" "), Japanese), "");
    }

    #[test]
    fn phrase_substitution_runs_in_order() {
        // "Software Engineer" must win over the later, shorter "Engineer" entry.
        assert_eq!(
            localize_text(Some("Software Engineer in Tokyo"), Japanese),
            "ソフトウェアエンジニア in 東京都"
        );
        assert_eq!(localize_address(Some("Chiba Prefecture"), Japanese), "Chiba県");
        assert_eq!(
            localize_text(Some("experienced developer"), Plain),
            "experienced developer"
        );
    }

    #[test]
    fn labels_differ_per_mode() {
        assert_eq!(Labels::for_mode(Plain).education, "Education");
        assert_eq!(Labels::for_mode(Japanese).education, "学歴");
    }
}

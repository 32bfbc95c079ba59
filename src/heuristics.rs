//! Keyword heuristics over free text.
//!
//! These are plain substring scans driven by fixed rule lists.  They are
//! intentionally approximate: "mid" also matches "middleware", "Java" also
//! matches "JavaScript".  What matters is that the output is reproducible.

use serde::{Deserialize, Serialize};

use crate::config::LocalizationMode;

/// Technologies recognised in descriptions, in output order.
pub const TECHNOLOGIES: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Ruby",
    "Rails",
    "SQL",
    "AWS",
];

struct AchievementRule {
    keywords: &'static [&'static str],
    plain: &'static str,
    japanese: &'static str,
}

impl AchievementRule {
    fn phrase(&self, mode: LocalizationMode) -> &'static str {
        match mode {
            LocalizationMode::Plain => self.plain,
            LocalizationMode::Japanese => self.japanese,
        }
    }
}

// Keywords are lower-case; descriptions are lower-cased before scanning.
const ACHIEVEMENT_RULES: &[AchievementRule] = &[
    AchievementRule {
        keywords: &["achieved", "successfully"],
        plain: "Successful project delivery",
        japanese: "プロジェクトの成功",
    },
    AchievementRule {
        keywords: &["improved", "increased"],
        plain: "Efficiency improvement",
        japanese: "効率性の向上",
    },
];

/// Returns one phrase per achievement family mentioned in `description`.
///
/// At most one entry per family is produced, however many of its keywords occur.
pub fn extract_achievements(description: Option<&str>, mode: LocalizationMode) -> Vec<String> {
    let Some(description) = description else {
        return Vec::new();
    };
    let haystack = description.to_lowercase();

    ACHIEVEMENT_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|rule| rule.phrase(mode).to_owned())
        .collect()
}

/// Returns the entries of [`TECHNOLOGIES`] that appear verbatim in `description`,
/// in list order.
pub fn extract_technologies(description: Option<&str>) -> Vec<String> {
    let Some(description) = description else {
        return Vec::new();
    };

    TECHNOLOGIES
        .iter()
        .filter(|tech| description.contains(*tech))
        .map(|tech| (*tech).to_owned())
        .collect()
}

/// Coarse proficiency derived from a skill name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn label(self, mode: LocalizationMode) -> &'static str {
        match (self, mode) {
            (Self::Basic, LocalizationMode::Plain) => "Basic",
            (Self::Intermediate, LocalizationMode::Plain) => "Intermediate",
            (Self::Advanced, LocalizationMode::Plain) => "Advanced",
            (Self::Basic, LocalizationMode::Japanese) => "初級",
            (Self::Intermediate, LocalizationMode::Japanese) => "中級",
            (Self::Advanced, LocalizationMode::Japanese) => "上級",
        }
    }
}

const LEVEL_RULES: &[(&[&str], SkillLevel)] = &[
    (&["expert", "advanced"], SkillLevel::Advanced),
    (&["intermediate", "mid"], SkillLevel::Intermediate),
    (&["basic", "beginner"], SkillLevel::Basic),
];

/// Guesses a skill level from tokens in the name; defaults to intermediate.
pub fn determine_skill_level(skill_name: &str) -> SkillLevel {
    let name = skill_name.to_lowercase();
    LEVEL_RULES
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|token| name.contains(token)))
        .map(|(_, level)| *level)
        .unwrap_or(SkillLevel::Intermediate)
}

#[cfg(test)]
mod tests {
    use super::*;

    use LocalizationMode::{Japanese, Plain};

    #[test]
    fn both_achievement_families_match() {
        let description = "Successfully improved deployment using Python and AWS";
        assert_eq!(
            extract_achievements(Some(description), Japanese),
            ["プロジェクトの成功", "効率性の向上"]
        );
        assert_eq!(
            extract_achievements(Some(description), Plain),
            ["Successful project delivery", "Efficiency improvement"]
        );
    }

    #[test]
    fn achievements_are_one_per_family() {
        let description = "achieved targets, successfully shipped, improved and increased revenue";
        assert_eq!(extract_achievements(Some(description), Plain).len(), 2);
        assert_eq!(
            extract_achievements(Some("increased throughput"), Japanese),
            ["効率性の向上"]
        );
    }

    #[test]
    fn nothing_matched_yields_empty() {
        assert!(extract_achievements(Some("maintained legacy code"), Plain).is_empty());
        assert!(extract_achievements(None, Plain).is_empty());
        assert!(extract_technologies(Some("Go and Rust")).is_empty());
        assert!(extract_technologies(None).is_empty());
    }

    #[test]
    fn technologies_follow_canonical_order() {
        assert_eq!(
            extract_technologies(Some("AWS first, then SQL, then Python")),
            ["Python", "SQL", "AWS"]
        );
        assert_eq!(
            extract_technologies(Some("Successfully improved deployment using Python and AWS")),
            ["Python", "AWS"]
        );
    }

    #[test]
    fn technologies_have_no_duplicates() {
        let found = extract_technologies(Some("Python Python JavaScript Ruby on Rails"));
        assert_eq!(found, ["JavaScript", "Python", "Java", "Ruby", "Rails"]);
    }

    #[test]
    fn skill_levels_from_names() {
        assert_eq!(determine_skill_level("Python - Advanced"), SkillLevel::Advanced);
        assert_eq!(determine_skill_level("EXPERT in Go"), SkillLevel::Advanced);
        assert_eq!(determine_skill_level("SQL (mid)"), SkillLevel::Intermediate);
        assert_eq!(determine_skill_level("Beginner Rust"), SkillLevel::Basic);
        assert_eq!(determine_skill_level("Kubernetes"), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::Advanced.label(Japanese), "上級");
        assert_eq!(SkillLevel::Basic.label(Plain), "Basic");
    }
}

//! Projections from a [`Resume`] to the two document trees.
//!
//! Both functions are pure: the same résumé and mode always give the same tree.

use crate::config::LocalizationMode;
use crate::document::{
    BasicInfo, CertificationEntry, DetailedExperienceEntry, DocumentTree, EducationEntry,
    ExperienceEntry, Rirekisho, ShokumuKeirekisho, SkillEntry,
};
use crate::heuristics::{determine_skill_level, extract_achievements, extract_technologies};
use crate::localize::{
    format_date, localize_address, localize_text, translate_optional, translate_term,
};
use crate::resume::{Certification, Education, Experience, Resume, Skill};

/// Builds the rirekisho tree.
pub fn build_basic(resume: &Resume, mode: LocalizationMode) -> DocumentTree {
    Rirekisho {
        basic_info: basic_info(resume, mode),
        education: resume
            .educations
            .iter()
            .map(|education| education_entry(education, mode))
            .collect(),
        experience: resume
            .experiences
            .iter()
            .map(|experience| experience_entry(experience, mode))
            .collect(),
        skills: skills(&resume.skills, mode),
        certifications: certifications(&resume.certifications, mode),
    }
    .into()
}

/// Builds the shokumu-keirekisho tree, including extracted achievements and technologies.
pub fn build_detailed(resume: &Resume, mode: LocalizationMode) -> DocumentTree {
    ShokumuKeirekisho {
        basic_info: basic_info(resume, mode),
        experience: resume
            .experiences
            .iter()
            .map(|experience| detailed_experience_entry(experience, mode))
            .collect(),
        skills: skills(&resume.skills, mode),
        certifications: certifications(&resume.certifications, mode),
    }
    .into()
}

fn basic_info(resume: &Resume, mode: LocalizationMode) -> BasicInfo {
    BasicInfo {
        name: resume.title.clone(),
        address: localize_address(resume.address.as_deref(), mode),
        phone: resume.phone_number.clone().unwrap_or_default(),
        summary: localize_text(resume.summary.as_deref(), mode),
        photo: resume.photo.clone(),
    }
}

fn education_entry(education: &Education, mode: LocalizationMode) -> EducationEntry {
    EducationEntry {
        school_name: education.school_name.clone().unwrap_or_default(),
        institution_type: translate_optional(education.institution_type.as_deref(), mode),
        degree: translate_optional(education.degree.as_deref(), mode),
        field: translate_optional(education.field.as_deref(), mode),
        start_date: format_date(education.start_date.as_ref(), mode),
        end_date: format_date(education.end_date.as_ref(), mode),
        description: localize_text(education.description.as_deref(), mode),
    }
}

fn experience_entry(experience: &Experience, mode: LocalizationMode) -> ExperienceEntry {
    ExperienceEntry {
        company: experience.company_name.clone().unwrap_or_default(),
        title: translate_optional(experience.title.as_deref(), mode),
        start_date: format_date(experience.start_date.as_ref(), mode),
        end_date: format_date(experience.end_date.as_ref(), mode),
        description: localize_text(experience.description.as_deref(), mode),
    }
}

fn detailed_experience_entry(
    experience: &Experience,
    mode: LocalizationMode,
) -> DetailedExperienceEntry {
    let ExperienceEntry {
        company,
        title,
        start_date,
        end_date,
        description,
    } = experience_entry(experience, mode);

    // Extraction runs on the source text; Japanese substitution would hide the keywords.
    let source = experience.description.as_deref();

    DetailedExperienceEntry {
        company,
        title,
        start_date,
        end_date,
        description,
        achievements: extract_achievements(source, mode),
        technologies: extract_technologies(source),
    }
}

fn skills(skills: &[Skill], mode: LocalizationMode) -> Vec<SkillEntry> {
    skills
        .iter()
        .map(|skill| SkillEntry {
            name: translate_term(&skill.name, mode),
            level: determine_skill_level(&skill.name).label(mode).to_owned(),
        })
        .collect()
}

fn certifications(certifications: &[Certification], mode: LocalizationMode) -> Vec<CertificationEntry> {
    certifications
        .iter()
        .map(|certification| CertificationEntry {
            name: certification.name.clone(),
            completion_date: format_date(certification.completion_date.as_ref(), mode),
        })
        .collect()
}

//! Section layouts for the two document kinds.
//!
//! Turns a [`DocumentTree`] into a [`Layout`]: which sections appear, in which
//! order, what goes in each table, and what happens to empty collections.
//! Education, basic work experience and skills keep their table with a single
//! blank row when empty; certifications are left out entirely.

use chrono::NaiveDate;
use log::debug;

use crate::config::LocalizationMode;
use crate::document::{
    BasicInfo, CertificationEntry, DetailedExperienceEntry, DocumentTree, EducationEntry,
    ExperienceEntry, Rirekisho, ShokumuKeirekisho, SkillEntry,
};
use crate::localize::Labels;
use crate::model::{Block, HorizontalAlignment, KeyValueTable, Layout, PhotoBox, RichParagraph, Section, Table};
use crate::richtext::Span;
use crate::sanitize::sanitize_for_pdf;

pub const TITLE_SIZE: u8 = 28;
pub const ENTRY_HEADING_SIZE: u8 = 14;
const TITLE_GAP_PT: f64 = 30.0;
const STAMP_GAP_PT: u16 = 10;
const ENTRY_GAP_PT: u16 = 10;
const ENTRY_SEPARATOR_GAP_PT: u16 = 15;

/// Inputs to the layout stage besides the tree itself.
#[derive(Clone, Copy, Debug)]
pub struct LayoutOptions {
    pub mode: LocalizationMode,
    pub sanitize: bool,
    /// Date printed in the generation stamp.
    pub generated_on: NaiveDate,
}

impl LayoutOptions {
    fn labels(&self) -> &'static Labels {
        Labels::for_mode(self.mode)
    }

    /// Prepares user-supplied text for printing.
    fn text(&self, value: &str) -> String {
        if self.sanitize {
            sanitize_for_pdf(value)
        } else {
            value.to_owned()
        }
    }
}

/// Lays out a document tree according to its kind.
pub fn layout_document(tree: &DocumentTree, options: &LayoutOptions) -> Layout {
    let layout = match tree {
        DocumentTree::Rirekisho(doc) => layout_rirekisho(doc, options),
        DocumentTree::ShokumuKeirekisho(doc) => layout_shokumu_keirekisho(doc, options),
    };
    debug!(
        "Laid out {:?} with {} sections",
        tree.kind(),
        layout.sections().len()
    );
    layout
}

/// Rirekisho: title, photo box, personal information, education, work
/// experience, skills, certifications, self-PR and the generation stamp.
pub fn layout_rirekisho(doc: &Rirekisho, options: &LayoutOptions) -> Layout {
    let labels = options.labels();
    let info = &doc.basic_info;
    let mut layout = Layout::new(options.text(&info.name));

    layout.push_section(title_section(labels.rirekisho_title));
    layout.push_section(
        Section::untitled()
            .with_block(Block::Photo(
                PhotoBox::new(labels.photo).with_image(info.photo.clone()),
            ))
            .with_gap_after(ENTRY_GAP_PT.into()),
    );
    layout.push_section(
        Section::new(labels.personal_information).with_block(Block::KeyValue(
            KeyValueTable::new()
                .with_row(labels.name, options.text(&info.name))
                .with_row(labels.address, options.text(&info.address))
                .with_row(labels.phone, options.text(&info.phone))
                .with_row(labels.date_of_birth, "")
                .with_row(labels.gender, "")
                .with_row(labels.email, ""),
        )),
    );
    layout.push_section(
        Section::new(labels.education)
            .with_block(Block::Table(education_table(&doc.education, options))),
    );
    layout.push_section(
        Section::new(labels.work_experience)
            .with_block(Block::Table(experience_table(&doc.experience, options))),
    );
    layout.push_section(
        Section::new(labels.skills_and_certifications)
            .with_block(Block::Table(skills_table(&doc.skills, options))),
    );
    if let Some(section) = certifications_section(&doc.certifications, options) {
        layout.push_section(section);
    }
    layout.push_section(summary_section(labels.self_pr, info, options));
    layout.push_section(stamp_section(options));

    layout
}

/// Shokumu-keirekisho: title, basic information, career summary, detailed
/// work experience, skills, certifications and the generation stamp.
pub fn layout_shokumu_keirekisho(doc: &ShokumuKeirekisho, options: &LayoutOptions) -> Layout {
    let labels = options.labels();
    let info = &doc.basic_info;
    let mut layout = Layout::new(options.text(&info.name));

    layout.push_section(title_section(labels.shokumu_title));
    layout.push_section(
        Section::new(labels.basic_information).with_block(Block::KeyValue(
            KeyValueTable::new()
                .with_row(labels.name, options.text(&info.name))
                .with_row(labels.address, options.text(&info.address))
                .with_row(labels.phone, options.text(&info.phone))
                .with_row(labels.email, ""),
        )),
    );
    layout.push_section(summary_section(labels.career_summary, info, options));
    layout.push_section(detailed_experience_section(&doc.experience, options));
    layout.push_section(
        Section::new(labels.skills).with_block(Block::Table(skills_table(&doc.skills, options))),
    );
    if let Some(section) = certifications_section(&doc.certifications, options) {
        layout.push_section(section);
    }
    layout.push_section(stamp_section(options));

    layout
}

fn title_section(title: &str) -> Section {
    Section::untitled()
        .with_block(Block::Paragraph(
            RichParagraph::new(vec![Span::new(title).bold().sized(TITLE_SIZE)])
                .with_alignment(HorizontalAlignment::Center),
        ))
        .with_gap_after(TITLE_GAP_PT)
}

fn summary_section(heading: &str, info: &BasicInfo, options: &LayoutOptions) -> Section {
    let section = Section::new(heading);
    if info.summary.trim().is_empty() {
        section
    } else {
        section.with_block(Block::text(options.text(&info.summary)))
    }
}

fn stamp_section(options: &LayoutOptions) -> Section {
    let labels = options.labels();
    let date = options
        .generated_on
        .format(labels.created_date_format)
        .to_string();
    Section::untitled()
        .with_block(Block::Space(STAMP_GAP_PT))
        .with_block(Block::Paragraph(
            RichParagraph::new(vec![Span::new(format!("{} {}", labels.created, date))])
                .with_alignment(HorizontalAlignment::Right),
        ))
        .with_gap_after(0.0)
}

/// `"{start} - {end}"`, collapsing to what is present.
pub fn period(start: &str, end: &str) -> String {
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("{start} -"),
        (true, false) => format!("- {end}"),
        (false, false) => format!("{start} - {end}"),
    }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn education_table(entries: &[EducationEntry], options: &LayoutOptions) -> Table {
    let labels = options.labels();
    let mut table = Table::new([labels.period, labels.school_name, labels.degree_major]);
    for entry in entries {
        table.push_row([
            options.text(&period(&entry.start_date, &entry.end_date)),
            options.text(&entry.school_name),
            options.text(&join_non_empty(&[&entry.degree, &entry.field])),
        ]);
    }
    if entries.is_empty() {
        table.push_blank_row();
    }
    table
}

fn experience_table(entries: &[ExperienceEntry], options: &LayoutOptions) -> Table {
    let labels = options.labels();
    let mut table = Table::new([labels.period, labels.company_name, labels.position]);
    for entry in entries {
        table.push_row([
            options.text(&period(&entry.start_date, &entry.end_date)),
            options.text(&entry.company),
            options.text(&entry.title),
        ]);
    }
    if entries.is_empty() {
        table.push_blank_row();
    }
    table
}

fn skills_table(entries: &[SkillEntry], options: &LayoutOptions) -> Table {
    let labels = options.labels();
    let mut table = Table::new([labels.skill_name, labels.level]).with_weights(vec![2, 1]);
    for entry in entries {
        table.push_row([options.text(&entry.name), options.text(&entry.level)]);
    }
    if entries.is_empty() {
        table.push_blank_row();
    }
    table
}

fn certifications_section(
    entries: &[CertificationEntry],
    options: &LayoutOptions,
) -> Option<Section> {
    if entries.is_empty() {
        return None;
    }

    let labels = options.labels();
    let mut table =
        Table::new([labels.certification_name, labels.completion_date]).with_weights(vec![2, 1]);
    for entry in entries {
        table.push_row([
            options.text(&entry.name),
            options.text(&entry.completion_date),
        ]);
    }
    Some(Section::new(labels.certifications).with_block(Block::Table(table)))
}

fn detailed_experience_section(
    entries: &[DetailedExperienceEntry],
    options: &LayoutOptions,
) -> Section {
    let labels = options.labels();
    let section = Section::new(labels.work_experience);

    if entries.is_empty() {
        return section.with_block(Block::text(labels.no_experience));
    }

    let blocks = entries.iter().enumerate().flat_map(|(index, entry)| {
        let mut blocks = vec![
            Block::text(
                Span::new(format!("[{}] {}", index + 1, options.text(&entry.company)))
                    .bold()
                    .sized(ENTRY_HEADING_SIZE),
            ),
            Block::text(format!(
                "{} {}",
                labels.period_prefix,
                options.text(&period(&entry.start_date, &entry.end_date))
            )),
            Block::text(format!(
                "{} {}",
                labels.position_prefix,
                options.text(&entry.title)
            )),
            Block::Space(ENTRY_GAP_PT),
            Block::text(Span::new(labels.job_description).bold()),
            Block::text(options.text(&entry.description)),
        ];

        if !entry.achievements.is_empty() {
            blocks.push(Block::text(Span::new(labels.achievements).bold()));
            blocks.extend(
                entry
                    .achievements
                    .iter()
                    .map(|achievement| Block::text(format!("- {}", options.text(achievement)))),
            );
        }

        if !entry.technologies.is_empty() {
            blocks.push(Block::paragraph(vec![
                Span::new(labels.technologies).bold(),
                Span::new(format!(" {}", options.text(&entry.technologies.join(", ")))),
            ]));
        }

        blocks.extend([
            Block::Space(ENTRY_SEPARATOR_GAP_PT),
            Block::Rule,
            Block::Space(ENTRY_SEPARATOR_GAP_PT),
        ]);
        blocks
    });

    section.with_blocks(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{build_basic, build_detailed};
    use crate::resume::{Certification, DateValue, Education, Experience, Resume, Skill};

    fn options(mode: LocalizationMode) -> LayoutOptions {
        LayoutOptions {
            mode,
            sanitize: mode == LocalizationMode::Plain,
            generated_on: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        }
    }

    fn jane_doe() -> Resume {
        Resume {
            summary: Some("experienced developer".into()),
            experiences: vec![Experience {
                company_name: Some("Acme".into()),
                title: Some("Developer".into()),
                start_date: Some(DateValue::text("2020-01")),
                end_date: Some(DateValue::text("2022-06")),
                description: Some("Successfully improved deployment using Python and AWS".into()),
            }],
            skills: vec![Skill::new("Python - Advanced")],
            ..Resume::new("Jane Doe")
        }
    }

    fn paragraph_texts(section: &Section) -> Vec<String> {
        section
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(paragraph) => Some(paragraph.text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn education_rows_follow_source_order() {
        let mut resume = Resume::new("Order");
        for (school, start) in [("North High", "2010-04"), ("East Uni", "2013-04"), ("West Grad", "2017-04")] {
            resume.educations.push(Education {
                school_name: Some(school.into()),
                degree: Some("Bachelor of Science".into()),
                field: Some("Computer Science".into()),
                start_date: Some(DateValue::text(start)),
                ..Education::default()
            });
        }

        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_basic(&resume, options.mode), &options);
        let table = layout
            .section("Education")
            .and_then(|section| section.tables().next())
            .expect("education table");

        assert_eq!(table.header(), ["Period", "School Name", "Degree/Major"]);
        let schools: Vec<_> = table.rows().iter().map(|row| row[1].as_str()).collect();
        assert_eq!(schools, ["North High", "East Uni", "West Grad"]);
        assert_eq!(table.rows()[0][0], "2010-04 -");
        assert_eq!(table.rows()[0][2], "Bachelor of Science Computer Science");
    }

    #[test]
    fn empty_collections_render_placeholder_rows() {
        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_basic(&Resume::new("Empty"), options.mode), &options);

        for heading in ["Education", "Work Experience", "Skills & Certifications"] {
            let table = layout
                .section(heading)
                .and_then(|section| section.tables().next())
                .unwrap_or_else(|| panic!("{heading} table missing"));
            assert_eq!(table.rows().len(), 1, "{heading}");
            assert!(table.rows()[0].iter().all(String::is_empty), "{heading}");
        }
        assert!(layout.section("Certifications").is_none());
    }

    #[test]
    fn certifications_section_appears_when_present() {
        let mut resume = Resume::new("Certified");
        resume.certifications.push(Certification {
            name: "AWS Solutions Architect".into(),
            completion_date: Some(DateValue::text("2021-09")),
        });

        let options = options(LocalizationMode::Japanese);
        let layout = layout_document(&build_detailed(&resume, options.mode), &options);
        let table = layout
            .section("資格")
            .and_then(|section| section.tables().next())
            .expect("certifications table");
        assert_eq!(table.rows(), [vec!["AWS Solutions Architect".to_owned(), "2021年09月".to_owned()]]);
    }

    #[test]
    fn detailed_layout_for_reference_scenario() {
        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_detailed(&jane_doe(), options.mode), &options);

        assert!(layout.section("Certifications").is_none());
        assert!(layout.section("Education").is_none());

        let experience = layout.section("Work Experience").expect("experience section");
        let texts = paragraph_texts(experience);
        assert_eq!(texts[0], "[1] Acme");
        assert_eq!(texts[1], "Period: 2020-01 - 2022-06");
        assert_eq!(texts[2], "Position: Developer");
        assert!(texts.contains(&"- Successful project delivery".to_owned()));
        assert!(texts.contains(&"- Efficiency improvement".to_owned()));
        assert!(texts.contains(&"Technologies: Python, AWS".to_owned()));
        assert_eq!(
            experience.blocks().iter().filter(|b| matches!(b, Block::Rule)).count(),
            1
        );

        let skills = layout
            .section("Skills")
            .and_then(|section| section.tables().next())
            .expect("skills table");
        assert_eq!(skills.rows(), [vec!["Python - Advanced".to_owned(), "Advanced".to_owned()]]);
    }

    #[test]
    fn empty_detailed_experience_prints_notice() {
        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_detailed(&Resume::new("Nobody"), options.mode), &options);
        let experience = layout.section("Work Experience").expect("experience section");
        assert_eq!(paragraph_texts(experience), ["No work experience available"]);

        let skills = layout.section("Skills").and_then(|s| s.tables().next()).expect("skills");
        assert_eq!(skills.rows().len(), 1);
    }

    #[test]
    fn sanitization_reaches_table_cells() {
        let mut resume = Resume::new("Jos\u{e9}");
        resume.skills.push(Skill::new("C++ \u{2013} expert"));

        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_basic(&resume, options.mode), &options);
        let skills = layout
            .section("Skills & Certifications")
            .and_then(|section| section.tables().next())
            .expect("skills table");

        assert_eq!(skills.rows()[0][0], "Cplus plus  - expert");
        assert_eq!(layout.title(), "Jos?");
    }

    #[test]
    fn blank_summary_has_no_paragraph() {
        let options = options(LocalizationMode::Plain);
        let layout = layout_document(&build_basic(&Resume::new("Quiet"), options.mode), &options);
        assert!(layout.section("Self-PR").expect("self-pr").blocks().is_empty());
    }

    #[test]
    fn stamp_uses_configured_date() {
        let plain = options(LocalizationMode::Plain);
        let layout = layout_document(&build_basic(&jane_doe(), plain.mode), &plain);
        let stamp = layout.sections().last().expect("stamp section");
        assert_eq!(paragraph_texts(stamp), ["Created: 2024-04-01"]);

        let japanese = options(LocalizationMode::Japanese);
        let layout = layout_document(&build_detailed(&jane_doe(), japanese.mode), &japanese);
        let stamp = layout.sections().last().expect("stamp section");
        assert_eq!(paragraph_texts(stamp), ["作成日: 2024年04月01日"]);
    }

    #[test]
    fn period_collapses_missing_sides() {
        assert_eq!(period("", ""), "");
        assert_eq!(period("2020-01", ""), "2020-01 -");
        assert_eq!(period("", "2020-01"), "- 2020-01");
        assert_eq!(period("2019-04", "2020-01"), "2019-04 - 2020-01");
    }
}

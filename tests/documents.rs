use chrono::NaiveDate;
use rirekisho::layout::{layout_document, LayoutOptions};
use rirekisho::{build_basic, build_detailed, DocumentTree, LocalizationMode, Resume};

const JANE_DOE: &str = r#"{
    "title": "Jane Doe",
    "summary": "experienced developer",
    "educations": [],
    "experiences": [{
        "company_name": "Acme",
        "title": "Developer",
        "start_date": "2020-01",
        "end_date": "2022-06",
        "description": "Successfully improved deployment using Python and AWS"
    }],
    "skills": [{"name": "Python - Advanced"}],
    "certifications": []
}"#;

fn options(mode: LocalizationMode) -> LayoutOptions {
    LayoutOptions {
        mode,
        sanitize: mode == LocalizationMode::Plain,
        generated_on: NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"),
    }
}

#[test]
fn reference_scenario_from_json() {
    let resume = Resume::from_json_str(JANE_DOE).expect("parse résumé");
    let DocumentTree::ShokumuKeirekisho(doc) = build_detailed(&resume, LocalizationMode::Plain)
    else {
        panic!("expected a shokumu-keirekisho tree");
    };

    let entry = &doc.experience[0];
    assert_eq!(
        entry.achievements,
        ["Successful project delivery", "Efficiency improvement"]
    );
    assert_eq!(entry.technologies, ["Python", "AWS"]);
    assert_eq!(doc.skills[0].level, "Advanced");

    let layout = layout_document(&doc.into(), &options(LocalizationMode::Plain));
    assert!(layout.section("Certifications").is_none());
}

#[test]
fn null_and_full_dates_are_tolerated() {
    let json = r#"{
        "title": "Dates",
        "educations": [
            {"school_name": "A", "start_date": null, "end_date": "2015-03-31"},
            {"school_name": "B", "start_date": "", "end_date": "2021-09"}
        ],
        "certifications": [{"name": "Cert", "completion_date": null}]
    }"#;
    let resume = Resume::from_json_str(json).expect("parse résumé");

    let DocumentTree::Rirekisho(plain) = build_basic(&resume, LocalizationMode::Plain) else {
        panic!("expected a rirekisho tree");
    };
    assert_eq!(plain.education[0].start_date, "");
    assert_eq!(plain.education[0].end_date, "2015-03-31");
    assert_eq!(plain.education[1].end_date, "2021-09");
    assert_eq!(plain.certifications[0].completion_date, "");

    let DocumentTree::Rirekisho(japanese) = build_basic(&resume, LocalizationMode::Japanese) else {
        panic!("expected a rirekisho tree");
    };
    assert_eq!(japanese.education[1].start_date, "");
    assert_eq!(japanese.education[1].end_date, "2021年09月");
}

#[test]
fn trees_survive_a_json_round_trip() {
    let resume = Resume::from_json_str(JANE_DOE).expect("parse résumé");
    for tree in [
        build_basic(&resume, LocalizationMode::Japanese),
        build_detailed(&resume, LocalizationMode::Japanese),
    ] {
        let json = serde_json::to_string(&tree).expect("serialize tree");
        let back: DocumentTree = serde_json::from_str(&json).expect("deserialize tree");
        assert_eq!(back, tree);
    }
}

#[test]
fn non_ascii_address_is_redacted_in_plain_mode() {
    let mut resume = Resume::from_json_str(JANE_DOE).expect("parse résumé");
    resume.address = Some("東京都渋谷区".into());

    let plain = build_basic(&resume, LocalizationMode::Plain);
    assert_eq!(
        plain.basic_info().address,
        "Address provided (Japanese characters not shown in PDF)"
    );

    let japanese = build_basic(&resume, LocalizationMode::Japanese);
    assert_eq!(japanese.basic_info().address, "東京都渋谷区");
}

mod common;

use shared_types::{ClaimType, Document, Node, OtherCase};

fn compose() -> Document {
    common::engine()
        .compose_backup(&common::property_case())
        .unwrap()
}

fn group_rows(doc: &Document, heading: &str) -> String {
    let at = doc.find_heading(heading).unwrap();
    doc.nodes()[at + 1].text()
}

#[test]
fn test_backup_groups() {
    let doc = compose();
    for heading in [
        "פרטי הפנייה",
        "פרטי התובע/ת",
        "פרטי הנתבע/ת",
        "הקשר בין הצדדים",
        "ילד/ה 1",
        "ילד/ה 2",
        "שאלון: מגורים",
        "שאלון: אלימות במשפחה",
        "תשובות: תביעה רכושית",
    ] {
        assert!(doc.find_heading(heading).is_some(), "missing {}", heading);
    }
    assert!(doc.find_heading("ילד/ה 3").is_none());
    assert!(doc.find_heading("פרטי עורך הדין").is_none());
}

#[test]
fn test_backup_value_formatting() {
    let doc = compose();

    let metadata = group_rows(&doc, "פרטי הפנייה");
    assert!(metadata.contains("מועד הגשה | 28/08/2024"));
    assert!(metadata.contains("סוגי תביעות | 1. תביעה רכושית"));

    let claimant = group_rows(&doc, "פרטי התובע/ת");
    assert!(claimant.contains("שם מלא | דנה כהן"));
    assert!(claimant.contains("תאריך לידה | -"));
    assert!(claimant.contains("\"employer\":\"משרד החינוך\""));

    let relationship = group_rows(&doc, "הקשר בין הצדדים");
    assert!(relationship.contains("מועד הנישואין | 15/06/2010"));

    let violence = group_rows(&doc, "שאלון: אלימות במשפחה");
    assert!(violence.contains("האם הייתה אלימות | לא"));

    let property = group_rows(&doc, "תשובות: תביעה רכושית");
    assert!(property.contains("דירות | 1. {"));
    assert!(property.contains("2. {"));
}

#[test]
fn test_backup_has_no_images() {
    let doc = compose();
    assert_eq!(doc.images().count(), 0);
    assert!(!doc.nodes().iter().any(|node| matches!(node, Node::PageBreak)));
}

#[test]
fn test_backup_repeated_claim_type_listed_once() {
    let mut case = common::property_case();
    case.claim_types = vec![ClaimType::Property, ClaimType::Divorce, ClaimType::Property];
    let doc = common::engine().compose_backup(&case).unwrap();

    let headings: Vec<String> = doc
        .nodes()
        .iter()
        .filter(|node| matches!(node, Node::Heading(_)))
        .map(Node::text)
        .collect();
    let property_groups = headings
        .iter()
        .filter(|h| h.as_str() == "תשובות: תביעה רכושית")
        .count();
    assert_eq!(property_groups, 1);

    let metadata = group_rows(&doc, "פרטי הפנייה");
    assert!(metadata.contains("1. תביעה רכושית\n2. "));
    assert!(!metadata.contains("3. "));
}

#[test]
fn test_backup_other_cases_as_tables() {
    let doc = compose();
    assert_eq!(group_rows(&doc, "שאלון: הליכים נוספים"), "-");

    let mut case = common::property_case();
    case.questionnaire.other_cases = vec![
        OtherCase {
            court: Some("בית הדין הרבני".to_string()),
            case_number: Some("12345/1".to_string()),
            subject: None,
        },
        OtherCase {
            court: Some("בית משפט השלום".to_string()),
            ..Default::default()
        },
    ];
    let doc = common::engine().compose_backup(&case).unwrap();

    let first_at = doc.find_heading("שאלון: הליך נוסף 1").unwrap();
    assert!(matches!(doc.nodes()[first_at + 1], Node::Table(_)));
    let first = group_rows(&doc, "שאלון: הליך נוסף 1");
    assert!(first.contains("בית משפט | בית הדין הרבני"));
    assert!(first.contains("מספר תיק | 12345/1"));
    assert!(first.contains("נושא | -"));
    assert!(group_rows(&doc, "שאלון: הליך נוסף 2").contains("בית משפט השלום"));
    assert!(doc.find_heading("שאלון: הליכים נוספים").is_none());
}

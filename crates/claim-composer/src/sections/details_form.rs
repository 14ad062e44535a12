//! Statement of details (הרצאת פרטים)
//!
//! Mirrors the fixed layout of the court form: sections א through ח, each a
//! short question/answer block. Absent answers print the placeholder.

use shared_types::{non_blank, Cell, EmploymentStatus, MaritalStatus, Node, Party, Table};

use crate::context::ComposeContext;
use crate::format::{
    self, date_or_not_specified, format_naive_date, or_not_specified, yes_no, NOT_SPECIFIED,
};
use crate::gender::Role;

pub fn marital_status_label(status: Option<MaritalStatus>) -> &'static str {
    match status {
        Some(MaritalStatus::Married) => "נשואים",
        Some(MaritalStatus::Cohabiting) => "ידועים בציבור",
        Some(MaritalStatus::Separated) => "נשואים, חיים בנפרד",
        Some(MaritalStatus::Divorced) => "גרושים",
        None => NOT_SPECIFIED,
    }
}

fn employment_label(status: Option<EmploymentStatus>) -> &'static str {
    match status {
        Some(EmploymentStatus::Employee) => "שכיר/ה",
        Some(EmploymentStatus::SelfEmployed) => "עצמאי/ת",
        Some(EmploymentStatus::Unemployed) => "לא עובד/ת",
        None => NOT_SPECIFIED,
    }
}

fn tenure_label(tenure: Option<&str>) -> &str {
    match non_blank(tenure) {
        Some("owned") => "דירה בבעלות",
        Some("rented") => "דירה שכורה",
        other => or_not_specified(other),
    }
}

fn optional_answer(flag: Option<bool>) -> &'static str {
    flag.map(yes_no).unwrap_or(NOT_SPECIFIED)
}

pub fn statement_of_details(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let style = ctx.style();
    let case = ctx.case;
    let questionnaire = &case.questionnaire;
    let mut nodes = vec![
        format::title(style, "הרצאת פרטים"),
        format::note(
            style,
            format!("לפי תקנה 7 לתקנות בית המשפט לענייני משפחה, בצירוף ל{}", ctx.claim.label()),
        ),
    ];

    // א. personal details of both parties
    nodes.push(format::section_header(style, "א. פרטים אישיים"));
    let mut personal = Table::new(vec![2, 3, 3]).row(vec![
        Cell::header("פרט"),
        Cell::header(ctx.claimant.title),
        Cell::header(ctx.respondent.title),
    ]);
    let rows: [(&str, fn(&Party) -> String); 6] = [
        ("שם מלא", |p| or_not_specified(p.full_name.as_deref()).to_string()),
        ("מספר זהות", |p| or_not_specified(p.id_number.as_deref()).to_string()),
        ("תאריך לידה", |p| date_or_not_specified(p.birth_date.as_deref())),
        ("כתובת", |p| or_not_specified(p.address.as_deref()).to_string()),
        ("טלפון", |p| or_not_specified(p.phone.as_deref()).to_string()),
        ("מצב תעסוקתי", |p| employment_label(p.employment.status).to_string()),
    ];
    for (label, value) in rows {
        personal.push_row(vec![
            Cell::header(label),
            Cell::text(value(&case.claimant)),
            Cell::text(value(&case.respondent)),
        ]);
    }
    nodes.push(Node::Table(personal));

    // ב. marital status history
    let relationship = &case.relationship;
    nodes.push(format::section_header(style, "ב. מצב אישי"));
    nodes.push(format::labeled_line(
        "מצב משפחתי",
        marital_status_label(relationship.marital_status),
    ));
    nodes.push(format::labeled_line(
        "מועד תחילת הקשר",
        date_or_not_specified(relationship.relationship_start_date.as_deref()),
    ));
    nodes.push(format::labeled_line(
        "מועד הנישואין",
        date_or_not_specified(relationship.wedding_date.as_deref()),
    ));
    nodes.push(format::labeled_line(
        "מועד הפרידה",
        date_or_not_specified(relationship.separation_date.as_deref()),
    ));

    // ג. children
    nodes.push(format::section_header(style, "ג. ילדים"));
    if case.children.is_empty() {
        nodes.push(format::paragraph("אין לצדדים ילדים משותפים."));
    } else {
        let mut children = Table::new(vec![1, 3, 2, 2, 3, 3]).row(vec![
            Cell::header("#"),
            Cell::header("שם"),
            Cell::header("מספר זהות"),
            Cell::header("תאריך לידה"),
            Cell::header("מקום מגורים"),
            Cell::header("ההורה האחר"),
        ]);
        for (i, child) in case.children.iter().enumerate() {
            children.push_row(vec![
                Cell::text((i + 1).to_string()),
                Cell::text(child.full_name().unwrap_or_else(|| NOT_SPECIFIED.to_string())),
                Cell::text(or_not_specified(child.id_number.as_deref())),
                Cell::text(date_or_not_specified(child.birth_date.as_deref())),
                Cell::text(or_not_specified(child.address.as_deref())),
                // Defaults to the respondent, the usual other parent
                Cell::text(
                    non_blank(child.other_parent_name.as_deref())
                        .unwrap_or(ctx.respondent.name.as_str()),
                ),
            ]);
        }
        nodes.push(Node::Table(children));
    }

    // ד. housing
    let housing = &questionnaire.housing;
    nodes.push(format::section_header(style, "ד. מגורים"));
    nodes.push(format::labeled_line(
        "מי מתגורר כיום בדירת המגורים",
        ctx.owner_label(housing.current_occupant.as_deref()),
    ));
    nodes.push(format::labeled_line(
        "סוג הדירה",
        tenure_label(housing.tenure.as_deref()),
    ));
    nodes.push(format::labeled_line(
        "כתובת",
        or_not_specified(housing.address.as_deref()),
    ));

    // ה. domestic violence; sub-questions only when violence is reported
    let violence = &questionnaire.domestic_violence;
    nodes.push(format::section_header(style, "ה. אלימות במשפחה"));
    nodes.push(format::labeled_line(
        "האם הייתה אלימות במשפחה",
        optional_answer(violence.occurred),
    ));
    if violence.occurred == Some(true) {
        nodes.push(format::labeled_line(
            "האם הוגשה תלונה במשטרה",
            optional_answer(violence.police_complaint),
        ));
        nodes.push(format::labeled_line(
            "האם ניתן צו הגנה",
            optional_answer(violence.protection_order),
        ));
        nodes.push(format::labeled_line(
            "פרטים",
            or_not_specified(violence.details.as_deref()),
        ));
    }

    // ו. other proceedings
    nodes.push(format::section_header(style, "ו. הליכים נוספים בין הצדדים"));
    if questionnaire.other_cases.is_empty() {
        nodes.push(format::paragraph("לא מתנהלים הליכים נוספים בין הצדדים."));
    } else {
        let mut cases = Table::new(vec![3, 2, 3]).row(vec![
            Cell::header("בית משפט"),
            Cell::header("מספר תיק"),
            Cell::header("נושא"),
        ]);
        for other in &questionnaire.other_cases {
            cases.push_row(vec![
                Cell::text(or_not_specified(other.court.as_deref())),
                Cell::text(or_not_specified(other.case_number.as_deref())),
                Cell::text(or_not_specified(other.subject.as_deref())),
            ]);
        }
        nodes.push(Node::Table(cases));
    }

    // ז. welfare services and mediation
    let welfare = &questionnaire.welfare_contact;
    nodes.push(format::section_header(style, "ז. פנייה לגורמי רווחה ויחידת הסיוע"));
    nodes.push(format::labeled_line(
        "האם פנו הצדדים לשירותי רווחה או ליחידת הסיוע",
        optional_answer(welfare.contacted),
    ));
    if welfare.contacted == Some(true) {
        nodes.push(format::labeled_line(
            "גורם מטפל",
            or_not_specified(welfare.unit.as_deref()),
        ));
        nodes.push(format::labeled_line(
            "פרטים",
            or_not_specified(welfare.details.as_deref()),
        ));
    }

    // ח. declaration
    let claimant = ctx.terms(Role::Claimant);
    nodes.push(format::section_header(style, "ח. הצהרה"));
    nodes.push(format::paragraph(format!(
        "אני {}, {}, {} כי הפרטים שמסרתי בהרצאת פרטים זו נכונים ומלאים.",
        claimant.pick("החתום מטה", "החתומה מטה"),
        claimant.name,
        claimant.pick("מצהיר", "מצהירה")
    )));
    nodes.push(format::labeled_line("תאריך", format_naive_date(ctx.today)));
    nodes.extend(format::signature_block(
        style,
        case.signatures.client.as_ref(),
        &claimant.name,
    ));

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use chrono::NaiveDate;
    use shared_types::{CaseRecord, Child, ClaimType, DomesticViolence, OtherCase, Questionnaire};

    fn text_of(case: &CaseRecord) -> String {
        let config = EngineConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let ctx = ComposeContext::new(case, &config, ClaimType::Divorce, today).unwrap();
        statement_of_details(&ctx)
            .iter()
            .map(Node::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn base_case() -> CaseRecord {
        CaseRecord {
            claimant: Party {
                full_name: Some("דנה כהן".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_all_sections_present() {
        let text = text_of(&base_case());
        for header in [
            "א. פרטים אישיים",
            "ב. מצב אישי",
            "ג. ילדים",
            "ד. מגורים",
            "ה. אלימות במשפחה",
            "ו. הליכים נוספים",
            "ז. פנייה לגורמי רווחה",
            "ח. הצהרה",
        ] {
            assert!(text.contains(header), "missing {}", header);
        }
        assert!(text.contains("אין לצדדים ילדים משותפים"));
        assert!(text.contains("תאריך: 10/03/2024"));
    }

    #[test]
    fn test_violence_sub_fields_are_conditional() {
        let mut case = base_case();
        assert!(!text_of(&case).contains("צו הגנה"));

        case.questionnaire = Questionnaire {
            domestic_violence: DomesticViolence {
                occurred: Some(true),
                protection_order: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let text = text_of(&case);
        assert!(text.contains("האם ניתן צו הגנה: כן"));
        assert!(text.contains(&format!("האם הוגשה תלונה במשטרה: {}", NOT_SPECIFIED)));
    }

    #[test]
    fn test_children_and_other_cases_tables() {
        let mut case = base_case();
        case.children = vec![Child {
            first_name: Some("נועה".to_string()),
            last_name: Some("כהן".to_string()),
            birth_date: Some("2015-09-01".to_string()),
            ..Default::default()
        }];
        case.questionnaire.other_cases = vec![OtherCase {
            court: Some("בית הדין הרבני".to_string()),
            case_number: Some("12345/1".to_string()),
            subject: None,
        }];
        let text = text_of(&case);
        assert!(text.contains("1 | נועה כהן"));
        assert!(text.contains("01/09/2015"));
        assert!(text.contains("בית הדין הרבני | 12345/1"));
    }

    #[test]
    fn test_children_table_names_the_other_parent() {
        let mut case = base_case();
        case.respondent.full_name = Some("יוסי כהן".to_string());
        case.children = vec![
            Child {
                first_name: Some("נועה".to_string()),
                ..Default::default()
            },
            Child {
                first_name: Some("עומר".to_string()),
                other_parent_name: Some("רונית לוי".to_string()),
                ..Default::default()
            },
        ];
        let text = text_of(&case);
        assert!(text.contains("ההורה האחר"));
        assert!(text.contains(&format!(
            "1 | נועה | {0} | {0} | {0} | יוסי כהן",
            NOT_SPECIFIED
        )));
        assert!(text.contains("| רונית לוי"));
    }
}

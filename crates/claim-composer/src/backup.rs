//! Backup Q&A document
//!
//! A flat review copy of the whole intake record for internal use. Walks the
//! record's JSON tree rather than the typed structs so that every answered
//! field shows up, including ones no claim composer reads. No legal-language
//! rewriting is applied.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use shared_types::{non_blank, CaseRecord, Cell, ClaimType, Document, Node, StyleConfig, Table};
use tracing::info;

use crate::error::ComposeError;
use crate::format::{self, format_date, yes_no};

/// Printed for empty or absent answers
pub const EMPTY_ANSWER: &str = "-";

lazy_static! {
    static ref DATE_SHAPED: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?)?$")
            .unwrap();
}

/// Render a single answer value
pub fn format_answer(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_ANSWER.to_string(),
        Value::Bool(flag) => yes_no(*flag).to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => match non_blank(Some(text.as_str())) {
            None => EMPTY_ANSWER.to_string(),
            Some(text) if DATE_SHAPED.is_match(text) => format_date(text),
            Some(text) => text.to_string(),
        },
        Value::Array(items) if items.is_empty() => EMPTY_ANSWER.to_string(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, format_answer(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) if map.is_empty() => EMPTY_ANSWER.to_string(),
        Value::Object(map) => Value::Object(map.clone()).to_string(),
    }
}

/// Hebrew question label for a record key; unknown keys print as-is
pub fn label_for(key: &str) -> &str {
    match key {
        "id" => "מספר פנייה",
        "submittedAt" => "מועד הגשה",
        "courtCity" => "עיר בית המשפט",
        "claimTypes" => "סוגי תביעות",
        "fullName" => "שם מלא",
        "idNumber" => "מספר זהות",
        "address" => "כתובת",
        "phone" => "טלפון",
        "email" => "דוא\"ל",
        "birthDate" => "תאריך לידה",
        "sex" => "מין",
        "marriageDate" => "תאריך נישואין",
        "employment" => "תעסוקה",
        "firstName" => "שם פרטי",
        "lastName" => "שם משפחה",
        "otherParentName" => "שם ההורה האחר",
        "maritalStatus" => "מצב משפחתי",
        "relationshipStartDate" => "מועד תחילת הקשר",
        "weddingDate" => "מועד הנישואין",
        "separationDate" => "מועד הפרידה",
        "legallyMarried" => "נישואין כדין",
        "currentOccupant" => "מי מתגורר בדירה",
        "tenure" => "סוג הדירה",
        "occurred" => "האם הייתה אלימות",
        "policeComplaint" => "תלונה במשטרה",
        "protectionOrder" => "צו הגנה",
        "details" => "פרטים",
        "court" => "בית משפט",
        "caseNumber" => "מספר תיק",
        "subject" => "נושא",
        "contacted" => "האם הייתה פנייה",
        "unit" => "גורם מטפל",
        "apartments" => "דירות",
        "vehicles" => "כלי רכב",
        "savings" => "חסכונות",
        "benefits" => "זכויות סוציאליות",
        "properties" => "נכסים נוספים",
        "debts" => "חובות",
        "withdrawnFunds" => "משיכת כספים",
        "whoWantsDivorce" => "מי מבקש את הגירושין ומדוע",
        "grounds" => "עילות הגירושין",
        "reconciliationAttempts" => "ניסיונות שלום בית",
        "reconciliationDetails" => "פרטי ניסיונות שלום בית",
        "requestedArrangement" => "הסדר משמורת מבוקש",
        "childrenLiveWith" => "הילדים מתגוררים אצל",
        "proposedVisitation" => "הסדרי שהות מוצעים",
        "reasons" => "נימוקים",
        "monthlyNeedsPerChild" => "צרכים חודשיים לילד",
        "requestedAmountPerChild" => "סכום מבוקש לילד",
        "housingShare" => "חלק במדור",
        "specialExpenses" => "הוצאות מיוחדות",
        "custodyTerms" => "משמורת",
        "visitationTerms" => "הסדרי שהות",
        "alimonyPerChild" => "מזונות לילד",
        "propertyTerms" => "חלוקת רכוש",
        "additionalTerms" => "הוראות נוספות",
        "licenseNumber" => "מספר רישיון",
        other => other,
    }
}

fn qa_table(map: &Map<String, Value>) -> Node {
    let mut table = Table::new(vec![2, 5]).row(vec![Cell::header("שאלה"), Cell::header("תשובה")]);
    for (key, value) in map {
        table.push_row(vec![
            Cell::text(label_for(key)),
            Cell::text(format_answer(value)),
        ]);
    }
    Node::Table(table)
}

fn push_group(nodes: &mut Vec<Node>, style: &StyleConfig, heading: &str, value: Option<&Value>) {
    nodes.push(format::section_header(style, heading));
    match value {
        Some(Value::Object(map)) if !map.is_empty() => nodes.push(qa_table(map)),
        _ => nodes.push(format::paragraph(EMPTY_ANSWER)),
    }
}

fn claim_group_heading(claim: ClaimType) -> String {
    format!("תשובות: {}", claim.label())
}

/// Compose the review document for the whole record
pub fn compose_backup(case: &CaseRecord, style: &StyleConfig) -> Result<Document, ComposeError> {
    let tree = serde_json::to_value(case)?;
    let record = tree.as_object().cloned().unwrap_or_default();
    let name = case.claimant.name().unwrap_or(EMPTY_ANSWER);

    let mut doc = Document::new(format!("גיבוי שאלון - {}", name), style.clone());
    let mut nodes = vec![
        format::title(style, "גיבוי תשובות השאלון"),
        format::note(style, "מסמך פנימי לבקרה בלבד, אינו מיועד להגשה לבית המשפט."),
    ];

    let selected = crate::distinct_claims(&case.claim_types);
    let metadata: Map<String, Value> = ["id", "submittedAt", "courtCity"]
        .into_iter()
        .filter_map(|key| record.get(key).map(|value| (key.to_string(), value.clone())))
        .chain(std::iter::once((
            "claimTypes".to_string(),
            Value::Array(
                selected
                    .iter()
                    .map(|claim| Value::String(claim.label().to_string()))
                    .collect(),
            ),
        )))
        .collect();
    push_group(
        &mut nodes,
        style,
        "פרטי הפנייה",
        Some(&Value::Object(metadata)),
    );

    push_group(&mut nodes, style, "פרטי התובע/ת", record.get("claimant"));
    push_group(&mut nodes, style, "פרטי הנתבע/ת", record.get("respondent"));
    push_group(&mut nodes, style, "הקשר בין הצדדים", record.get("relationship"));

    if let Some(Value::Array(children)) = record.get("children") {
        for (i, child) in children.iter().enumerate() {
            push_group(&mut nodes, style, &format!("ילד/ה {}", i + 1), Some(child));
        }
    }

    if let Some(Value::Object(questionnaire)) = record.get("questionnaire") {
        for (key, heading) in [
            ("housing", "שאלון: מגורים"),
            ("domesticViolence", "שאלון: אלימות במשפחה"),
            ("welfareContact", "שאלון: פנייה לגורמי רווחה"),
        ] {
            push_group(&mut nodes, style, heading, questionnaire.get(key));
        }
        match questionnaire.get("otherCases") {
            Some(Value::Array(cases)) if !cases.is_empty() => {
                for (i, other) in cases.iter().enumerate() {
                    let heading = format!("שאלון: הליך נוסף {}", i + 1);
                    push_group(&mut nodes, style, &heading, Some(other));
                }
            }
            _ => push_group(&mut nodes, style, "שאלון: הליכים נוספים", None),
        }
    }

    for claim in &selected {
        push_group(
            &mut nodes,
            style,
            &claim_group_heading(*claim),
            record.get(claim.key()),
        );
    }

    if let Some(lawyer @ Value::Object(_)) = record.get("lawyer") {
        push_group(&mut nodes, style, "פרטי עורך הדין", Some(lawyer));
    }

    if !case.attachments.is_empty() {
        nodes.push(format::section_header(style, "נספחים"));
        let mut table = Table::new(vec![1, 4, 1]).row(vec![
            Cell::header("נספח"),
            Cell::header("תיאור"),
            Cell::header("תמונות"),
        ]);
        for attachment in &case.attachments {
            table.push_row(vec![
                Cell::text(attachment.label.clone()),
                Cell::text(non_blank(attachment.description.as_deref()).unwrap_or(EMPTY_ANSWER)),
                Cell::text(attachment.images.len().to_string()),
            ]);
        }
        nodes.push(Node::Table(table));
    }

    doc.extend(nodes);
    info!(nodes = doc.nodes.len(), "Backup document composed");
    Ok(doc)
}

//! Formatting utilities and reusable node builders
//!
//! Every builder takes the [`StyleConfig`] explicitly; there is no global
//! style state.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shared_types::{
    non_blank, Align, Cell, Heading, ImageData, Image, Lawyer, Node, Paragraph, Party, Run,
    StyleConfig, Table,
};
use tracing::warn;

use crate::gender::GenderTerms;

/// Placeholder for an absent scalar field
pub const NOT_SPECIFIED: &str = "לא צוין";

/// Placeholder line drawn where a signature image is missing
pub const SIGNATURE_PLACEHOLDER: &str = "____________________";

/// Placeholder for the judge and case number before assignment
pub const BLANK_FIELD: &str = "__________";

/// Return the value or the "not specified" placeholder
pub fn or_not_specified(value: Option<&str>) -> &str {
    non_blank(value).unwrap_or(NOT_SPECIFIED)
}

/// Hebrew yes/no
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "כן"
    } else {
        "לא"
    }
}

/// Group an integer with thousands separators: 6000000 -> "6,000,000"
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Shekel amount as printed in court documents: "6,000,000 ₪"
pub fn format_currency(amount: i64) -> String {
    format!("{} ₪", group_thousands(amount))
}

/// Format a date string as DD/MM/YYYY
///
/// Accepts ISO dates, RFC 3339 timestamps and naive timestamps. Anything else
/// is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    parse_date(trimmed)
        .map(format_naive_date)
        .unwrap_or_else(|| raw.to_string())
}

/// Parse the date shapes the intake wizard produces
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Optional date field formatted, or the placeholder
pub fn date_or_not_specified(value: Option<&str>) -> String {
    non_blank(value)
        .map(format_date)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

// ============================================================================
// Node builders
// ============================================================================

/// Centered, underlined document title
pub fn title(style: &StyleConfig, text: impl Into<String>) -> Node {
    Node::Heading(Heading {
        level: 1,
        text: text.into(),
        size: style.title_size,
        align: Align::Center,
        underline: true,
    })
}

/// Section header
pub fn section_header(style: &StyleConfig, text: impl Into<String>) -> Node {
    Node::Heading(Heading {
        level: 2,
        text: text.into(),
        size: style.heading_size,
        align: Align::Start,
        underline: true,
    })
}

/// Subsection header
pub fn subsection_header(style: &StyleConfig, text: impl Into<String>) -> Node {
    Node::Heading(Heading {
        level: 3,
        text: text.into(),
        size: style.body_size,
        align: Align::Start,
        underline: false,
    })
}

/// Justified body paragraph
pub fn paragraph(text: impl Into<String>) -> Node {
    Node::Paragraph(Paragraph::new(vec![Run::plain(text)]).aligned(Align::Justify))
}

/// Paragraph made of the given runs
pub fn paragraph_runs(runs: Vec<Run>) -> Node {
    Node::Paragraph(Paragraph::new(runs).aligned(Align::Justify))
}

/// Single bold line
pub fn bold_line(text: impl Into<String>) -> Node {
    Node::Paragraph(Paragraph::new(vec![Run::bold(text)]))
}

/// "Label: value" with a bold label
pub fn labeled_line(label: &str, value: impl Into<String>) -> Node {
    Node::Paragraph(Paragraph::new(vec![
        Run::bold(format!("{}: ", label)),
        Run::plain(value),
    ]))
}

/// Paragraph prefixed by a printed number: "3. text"
pub fn numbered(number: impl std::fmt::Display, text: impl Into<String>) -> Node {
    numbered_runs(number, vec![Run::plain(text)])
}

pub fn numbered_runs(number: impl std::fmt::Display, runs: Vec<Run>) -> Node {
    let mut all = Vec::with_capacity(runs.len() + 1);
    all.push(Run::plain(format!("{}. ", number)));
    all.extend(runs);
    Node::Paragraph(Paragraph::new(all).aligned(Align::Justify))
}

/// Sequentially numbered paragraphs starting at 1
pub fn numbered_list<I, S>(items: I) -> Vec<Node>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, text)| numbered(i + 1, text))
        .collect()
}

/// Indented bullet
pub fn bullet(text: impl Into<String>) -> Node {
    Node::Paragraph(Paragraph::new(vec![Run::plain(format!("• {}", text.into()))]).indented(1))
}

/// Small italic note
pub fn note(style: &StyleConfig, text: impl Into<String>) -> Node {
    Node::Paragraph(Paragraph::new(vec![Run::plain(text).italic().sized(style.small_size)]))
}

/// Embed a signature image, or a blank signature line when it is absent
///
/// Always followed by the printed name line.
pub fn signature_block(
    style: &StyleConfig,
    signature: Option<&ImageData>,
    name_line: &str,
) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(3);
    match signature_image(style, signature) {
        Some(image) => nodes.push(image),
        None => nodes.push(Node::Paragraph(
            Paragraph::new(vec![Run::plain(SIGNATURE_PLACEHOLDER)]).aligned(Align::End),
        )),
    }
    nodes.push(Node::Paragraph(
        Paragraph::new(vec![Run::plain(name_line).sized(style.small_size)]).aligned(Align::End),
    ));
    nodes
}

/// Signature image node if the data decodes to non-empty bytes
pub fn signature_image(style: &StyleConfig, signature: Option<&ImageData>) -> Option<Node> {
    let data = signature?;
    match data.decode() {
        Some(bytes) => Some(Node::Image(Image {
            data: bytes,
            width_mm: style.signature_width_mm,
            align: Align::End,
        })),
        None => {
            warn!("Signature image could not be decoded, using placeholder line");
            None
        }
    }
}

/// Court name, case number, judge placeholder and the two-party table
pub fn court_header(
    style: &StyleConfig,
    court_city: &str,
    claimant: (&Party, &GenderTerms),
    respondent: (&Party, &GenderTerms),
    lawyer: Option<&Lawyer>,
) -> Vec<Node> {
    let mut nodes = vec![
        Node::Paragraph(
            Paragraph::new(vec![Run::bold(format!(
                "בבית המשפט לענייני משפחה ב{}",
                court_city
            ))
            .sized(style.heading_size)])
            .aligned(Align::Start),
        ),
        Node::Paragraph(
            Paragraph::new(vec![Run::plain(format!("תמ\"ש {}", BLANK_FIELD))])
                .aligned(Align::End),
        ),
        Node::Paragraph(Paragraph::new(vec![Run::plain(format!(
            "בפני כב' השופט/ת {}",
            BLANK_FIELD
        ))])),
    ];

    let mut table = Table::new(vec![1, 3]).without_borders();
    push_party_rows(&mut table, claimant.0, claimant.1);
    if let Some(lawyer) = lawyer {
        table.push_row(vec![
            Cell::text(""),
            Cell::text(format!(
                "ע\"י ב\"כ עו\"ד {}, מ.ר. {}",
                or_not_specified(lawyer.full_name.as_deref()),
                or_not_specified(lawyer.license_number.as_deref())
            )),
        ]);
        table.push_row(vec![
            Cell::text(""),
            Cell::text(format!(
                "{} | טל': {} | דוא\"ל: {}",
                or_not_specified(lawyer.address.as_deref()),
                or_not_specified(lawyer.phone.as_deref()),
                or_not_specified(lawyer.email.as_deref())
            )),
        ]);
    }
    table.push_row(vec![Cell::text(""), Cell::header("- נגד -")]);
    push_party_rows(&mut table, respondent.0, respondent.1);
    nodes.push(Node::Table(table));
    nodes
}

fn push_party_rows(table: &mut Table, party: &Party, terms: &GenderTerms) {
    table.push_row(vec![
        Cell::header(format!("{}:", terms.title)),
        Cell::text(format!(
            "{}, ת.ז. {}",
            terms.name,
            or_not_specified(party.id_number.as_deref())
        )),
    ]);
    table.push_row(vec![
        Cell::text(""),
        Cell::text(format!("מרח' {}", or_not_specified(party.address.as_deref()))),
    ]);
    table.push_row(vec![
        Cell::text(""),
        Cell::text(format!(
            "טל': {} | דוא\"ל: {}",
            or_not_specified(party.phone.as_deref()),
            or_not_specified(party.email.as_deref())
        )),
    ]);
}

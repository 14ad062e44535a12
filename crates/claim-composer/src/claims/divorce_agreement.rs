use shared_types::{non_blank, ClaimType, DivorceAgreementAnswers, Node};

use super::DocumentComposer;
use crate::context::ComposeContext;
use crate::format::{self, format_currency};
use crate::remedies::Remedy;

pub struct DivorceAgreementComposer;

fn push_term(terms: &mut Vec<(&'static str, String)>, label: &'static str, text: Option<&str>) {
    if let Some(text) = non_blank(text) {
        terms.push((label, text.to_string()));
    }
}

/// Agreed terms in printed order, skipping those left blank
fn agreed_terms(answers: &DivorceAgreementAnswers) -> Vec<(&'static str, String)> {
    let mut terms = Vec::new();
    push_term(&mut terms, "משמורת הקטינים", answers.custody_terms.as_deref());
    push_term(&mut terms, "הסדרי שהות", answers.visitation_terms.as_deref());
    match answers.alimony_per_child.as_ref() {
        Some(amount) if amount.coerce() > 0 => terms.push((
            "מזונות",
            format!("{} לחודש לכל קטין", format_currency(amount.coerce())),
        )),
        other => push_term(&mut terms, "מזונות", other.map(|amount| amount.as_str())),
    }
    push_term(&mut terms, "חלוקת הרכוש", answers.property_terms.as_deref());
    push_term(&mut terms, "הוראות נוספות", answers.additional_terms.as_deref());
    terms
}

impl DocumentComposer for DivorceAgreementComposer {
    fn claim(&self) -> ClaimType {
        ClaimType::DivorceAgreement
    }

    fn nature(&self) -> &'static str {
        "אישור הסכם גירושין ומתן תוקף של פסק דין"
    }

    fn remedy_summary(&self, _ctx: &ComposeContext<'_>) -> String {
        "אישור הסכם הגירושין שנכרת בין הצדדים ומתן תוקף של פסק דין להסכם".to_string()
    }

    fn governing_law(&self, _ctx: &ComposeContext<'_>) -> &'static str {
        "חוק בית המשפט לענייני משפחה, התשנ\"ה-1995"
    }

    fn facts_summary(&self, _ctx: &ComposeContext<'_>) -> String {
        "הצדדים הגיעו להסכמה מלאה בכל הנוגע לפירוק הקשר ביניהם ולהסדרת ענייניהם, וההסכם נכרת מרצונם החופשי ולאחר שהבינו את משמעותו.".to_string()
    }

    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node> {
        let style = ctx.style();
        let mut nodes = vec![format::subsection_header(style, "עיקרי ההסכם")];
        let terms = ctx
            .case
            .divorce_agreement
            .as_ref()
            .map(agreed_terms)
            .unwrap_or_default();
        if terms.is_empty() {
            nodes.push(format::paragraph(
                "תנאי ההסכם מפורטים בהסכם המצורף לבקשה זו.",
            ));
        } else {
            for (label, text) in terms {
                nodes.push(format::labeled_line(label, text));
            }
        }
        nodes
    }

    fn remedies(&self, _ctx: &ComposeContext<'_>) -> Vec<Remedy> {
        vec![
            Remedy::claim("לאשר את הסכם הגירושין שנכרת בין הצדדים."),
            Remedy::claim("ליתן להסכם תוקף של פסק דין."),
        ]
    }
}

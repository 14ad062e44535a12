use shared_types::{non_blank, AlimonyAnswers, AmountText, CaseRecord, ClaimType, Node};

use super::{DocumentComposer, UNSPECIFIED_AMOUNT};
use crate::context::ComposeContext;
use crate::format::{self, format_currency, NOT_SPECIFIED};
use crate::gender::Role;
use crate::remedies::Remedy;
use crate::sections;
use crate::transformer::NarrativeField;

const SPECIAL_EXPENSES: &str = "specialExpenses";
const REASONS: &str = "alimonyReasons";

pub struct AlimonyComposer;

fn answers<'c>(ctx: &'c ComposeContext<'_>) -> Option<&'c AlimonyAnswers> {
    ctx.case.alimony.as_ref()
}

fn amount(value: Option<&AmountText>) -> i64 {
    value.map(AmountText::coerce).unwrap_or(0)
}

/// Requested monthly amount per child, falling back to the stated needs
fn requested_per_child(ctx: &ComposeContext<'_>) -> i64 {
    let Some(answers) = answers(ctx) else {
        return 0;
    };
    match amount(answers.requested_amount_per_child.as_ref()) {
        0 => amount(answers.monthly_needs_per_child.as_ref()),
        requested => requested,
    }
}

fn amount_or_not_specified(value: i64) -> String {
    if value > 0 {
        format_currency(value)
    } else {
        NOT_SPECIFIED.to_string()
    }
}

impl AlimonyComposer {
    /// Yearly value of the claim: amount per child × children × 12
    pub fn annual_value(ctx: &ComposeContext<'_>) -> i64 {
        requested_per_child(ctx)
            .saturating_mul(ctx.case.children.len() as i64)
            .saturating_mul(12)
    }
}

impl DocumentComposer for AlimonyComposer {
    fn claim(&self) -> ClaimType {
        ClaimType::Alimony
    }

    fn narrative_fields(&self, case: &CaseRecord) -> Vec<NarrativeField> {
        let Some(answers) = case.alimony.as_ref() else {
            return Vec::new();
        };
        [
            (SPECIAL_EXPENSES, "הוצאות מיוחדות", &answers.special_expenses),
            (REASONS, "נימוקים לתביעת המזונות", &answers.reasons),
        ]
        .into_iter()
        .filter_map(|(key, label, text)| {
            non_blank(text.as_deref()).map(|text| NarrativeField::new(key, label, text))
        })
        .collect()
    }

    fn nature(&self) -> &'static str {
        "מזונות קטינים"
    }

    fn disputed_value(&self, ctx: &ComposeContext<'_>) -> String {
        match Self::annual_value(ctx) {
            0 => UNSPECIFIED_AMOUNT.to_string(),
            value => format!("{} (לשנה)", format_currency(value)),
        }
    }

    fn remedy_summary(&self, ctx: &ComposeContext<'_>) -> String {
        format!(
            "חיוב {} בתשלום מזונות חודשיים לקטינים ובמחצית הוצאותיהם החריגות",
            ctx.respondent.title
        )
    }

    fn governing_law(&self, _ctx: &ComposeContext<'_>) -> &'static str {
        "חוק לתיקון דיני המשפחה (מזונות), התשי\"ט-1959"
    }

    fn facts_summary(&self, ctx: &ComposeContext<'_>) -> String {
        format!(
            "{} {} לזון את {} הקטינים ולספק את צורכיהם, וצורכי הקטינים עומדים על סך {} לחודש לכל קטין.",
            ctx.respondent.title,
            ctx.respondent.pick("חייב", "חייבת"),
            ctx.respondent.pick("ילדיו", "ילדיה"),
            amount_or_not_specified(amount(
                answers(ctx).and_then(|a| a.monthly_needs_per_child.as_ref())
            ))
        )
    }

    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node> {
        let style = ctx.style();
        let answers = answers(ctx);

        let mut nodes = vec![
            format::subsection_header(style, "הכנסות הצדדים"),
            format::paragraph(sections::employment_narrative(ctx, Role::Claimant)),
            format::paragraph(sections::employment_narrative(ctx, Role::Respondent)),
            format::subsection_header(style, "צורכי הקטינים"),
            format::labeled_line(
                "צרכים חודשיים לכל קטין",
                amount_or_not_specified(amount(
                    answers.and_then(|a| a.monthly_needs_per_child.as_ref()),
                )),
            ),
            format::labeled_line(
                "חלק הקטינים בהוצאות המדור",
                amount_or_not_specified(amount(answers.and_then(|a| a.housing_share.as_ref()))),
            ),
        ];

        if let Some(expenses) = ctx.narrative(
            SPECIAL_EXPENSES,
            answers.and_then(|a| a.special_expenses.as_deref()),
        ) {
            nodes.push(format::subsection_header(style, "הוצאות מיוחדות"));
            nodes.push(format::paragraph(expenses));
        }
        if let Some(reasons) = ctx.narrative(REASONS, answers.and_then(|a| a.reasons.as_deref())) {
            nodes.push(format::subsection_header(style, "נימוקי התביעה"));
            nodes.push(format::paragraph(reasons));
        }
        nodes
    }

    fn remedies(&self, ctx: &ComposeContext<'_>) -> Vec<Remedy> {
        let respondent = &ctx.respondent;
        let mut remedies = vec![Remedy::claim(format!(
            "לחייב את {} לשלם מזונות לכל אחד מהקטינים בסך {} לחודש, צמוד למדד המחירים לצרכן, עד הגיעם לגיל 18 או עד סיום שירותם הצבאי.",
            respondent.title,
            amount_or_not_specified(requested_per_child(ctx))
        ))];
        let housing = amount(answers(ctx).and_then(|a| a.housing_share.as_ref()));
        if housing > 0 {
            remedies.push(Remedy::claim(format!(
                "לחייב את {} בתשלום מדור הקטינים בסך {} לחודש.",
                respondent.title,
                format_currency(housing)
            )));
        }
        remedies.extend([
            Remedy::claim(format!(
                "לחייב את {} במחצית מהוצאות החינוך והרפואה החריגות של הקטינים.",
                respondent.title
            )),
            Remedy::claim("לפסוק מזונות זמניים עד למתן פסק דין בתביעה."),
            Remedy::claim(format!(
                "לחייב את {} בהוצאות המשפט ובשכר טרחת עורך דין.",
                respondent.title
            )),
        ]);
        remedies
    }
}

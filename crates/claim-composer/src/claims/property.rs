use shared_types::{non_blank, CaseRecord, ClaimType, Node, PropertyAnswers};
use tracing::debug;

use super::DocumentComposer;
use crate::context::ComposeContext;
use crate::format::{self, format_currency, format_date, format_naive_date};
use crate::gender::Role;
use crate::property::PropertySummary;
use crate::remedies::{property_remedies, IncomeDisparity, Remedy};
use crate::sections;
use crate::transformer::NarrativeField;

const WITHDRAWN_FUNDS: &str = "withdrawnFunds";

pub struct PropertyComposer;

impl PropertyComposer {
    fn answers<'c>(ctx: &'c ComposeContext<'_>) -> &'c PropertyAnswers {
        static EMPTY: PropertyAnswers = PropertyAnswers {
            apartments: Vec::new(),
            vehicles: Vec::new(),
            savings: Vec::new(),
            benefits: Vec::new(),
            properties: Vec::new(),
            debts: Vec::new(),
            withdrawn_funds: None,
        };
        ctx.case.property.as_ref().unwrap_or(&EMPTY)
    }

    fn disparity(ctx: &ComposeContext<'_>) -> Option<IncomeDisparity> {
        let salary = |role: Role| {
            ctx.party(role)
                .employment
                .gross_salary
                .as_ref()
                .map(|amount| amount.coerce())
                .unwrap_or(0)
        };
        IncomeDisparity::evaluate(
            salary(Role::Claimant),
            salary(Role::Respondent),
            ctx.config.rules.disparity_ratio,
        )
    }

    /// Valuation date: the separation date, or today when none was given
    fn valuation_date(ctx: &ComposeContext<'_>) -> String {
        non_blank(ctx.case.relationship.separation_date.as_deref())
            .map(format_date)
            .unwrap_or_else(|| format_naive_date(ctx.today))
    }
}

impl DocumentComposer for PropertyComposer {
    fn claim(&self) -> ClaimType {
        ClaimType::Property
    }

    fn narrative_fields(&self, case: &CaseRecord) -> Vec<NarrativeField> {
        case.property
            .as_ref()
            .and_then(|answers| non_blank(answers.withdrawn_funds.as_deref()))
            .map(|text| vec![NarrativeField::new(WITHDRAWN_FUNDS, "משיכת כספים", text)])
            .unwrap_or_default()
    }

    fn nature(&self) -> &'static str {
        "איזון משאבים ופירוק שיתוף"
    }

    fn remedy_summary(&self, _ctx: &ComposeContext<'_>) -> String {
        "איזון המשאבים בין הצדדים וחלוקת הרכוש המשותף ביניהם".to_string()
    }

    fn facts_summary(&self, ctx: &ComposeContext<'_>) -> String {
        let summary = PropertySummary::from_answers(Self::answers(ctx));
        let regime = if ctx.case.relationship.is_legally_married() {
            "על הצדדים חל הסדר איזון המשאבים הקבוע בחוק יחסי ממון בין בני זוג"
        } else {
            "על הצדדים חלה חזקת השיתוף בנכסים שנצברו במהלך החיים המשותפים"
        };
        format!(
            "{}. במהלך חייהם המשותפים צברו הצדדים נכסים בשווי כולל של {} וחובות בסך {}, ו{} {} לחלוקתם השוויונית.",
            regime,
            format_currency(summary.asset_total()),
            format_currency(summary.debt_total()),
            ctx.claimant.title,
            ctx.claimant.pick("זכאי", "זכאית")
        )
    }

    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node> {
        let style = ctx.style();
        let answers = Self::answers(ctx);
        let summary = PropertySummary::from_answers(answers);
        debug!(
            categories = summary.categories.len(),
            items = summary.item_count(),
            assets = summary.asset_total(),
            debts = summary.debt_total(),
            "Property aggregated"
        );

        let mut nodes = vec![format::subsection_header(style, "רכוש הצדדים")];
        if summary.categories.is_empty() {
            nodes.push(format::paragraph("לא פורטו נכסים או חובות."));
        } else {
            nodes.extend(sections::property_summary(ctx, answers, &summary));
        }

        nodes.extend([
            format::subsection_header(style, "תעסוקה והכנסות"),
            format::paragraph(sections::employment_narrative(ctx, Role::Claimant)),
            format::paragraph(sections::employment_narrative(ctx, Role::Respondent)),
        ]);

        if let Some(text) = ctx.narrative(WITHDRAWN_FUNDS, answers.withdrawn_funds.as_deref()) {
            nodes.push(format::subsection_header(style, "משיכת כספים"));
            nodes.push(format::paragraph(text));
        }

        nodes.push(format::paragraph(format!(
            "המועד הקובע לאיזון המשאבים הוא {}.",
            Self::valuation_date(ctx)
        )));
        nodes
    }

    fn remedies(&self, ctx: &ComposeContext<'_>) -> Vec<Remedy> {
        let disparity = Self::disparity(ctx);
        if let Some(disparity) = &disparity {
            debug!(ratio = disparity.ratio, "Income disparity detected");
        }
        property_remedies(&ctx.claimant, &ctx.respondent, disparity.as_ref())
    }

    fn itemized_count(&self, ctx: &ComposeContext<'_>) -> usize {
        PropertySummary::from_answers(Self::answers(ctx)).item_count()
    }
}

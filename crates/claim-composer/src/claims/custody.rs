use shared_types::{non_blank, CaseRecord, ClaimType, CustodyAnswers, Node};

use super::{DocumentComposer, NOT_ASSESSABLE};
use crate::context::ComposeContext;
use crate::format::{self, NOT_SPECIFIED};
use crate::remedies::Remedy;
use crate::transformer::NarrativeField;

const VISITATION: &str = "proposedVisitation";
const REASONS: &str = "custodyReasons";

/// Requested custody arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrangement {
    Sole,
    Joint,
}

impl Arrangement {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match non_blank(raw)?.to_lowercase().as_str() {
            "sole" => Some(Arrangement::Sole),
            "joint" | "shared" => Some(Arrangement::Joint),
            _ => None,
        }
    }
}

pub struct CustodyComposer;

fn answers<'c>(ctx: &'c ComposeContext<'_>) -> Option<&'c CustodyAnswers> {
    ctx.case.custody.as_ref()
}

fn arrangement(ctx: &ComposeContext<'_>) -> Option<Arrangement> {
    Arrangement::parse(answers(ctx).and_then(|a| a.requested_arrangement.as_deref()))
}

fn minors(ctx: &ComposeContext<'_>) -> &'static str {
    if ctx.case.children.len() == 1 {
        "הקטין/ה"
    } else {
        "הקטינים"
    }
}

impl DocumentComposer for CustodyComposer {
    fn claim(&self) -> ClaimType {
        ClaimType::Custody
    }

    fn narrative_fields(&self, case: &CaseRecord) -> Vec<NarrativeField> {
        let Some(answers) = case.custody.as_ref() else {
            return Vec::new();
        };
        [
            (VISITATION, "הסדרי שהות מוצעים", &answers.proposed_visitation),
            (REASONS, "נימוקים למשמורת", &answers.reasons),
        ]
        .into_iter()
        .filter_map(|(key, label, text)| {
            non_blank(text.as_deref()).map(|text| NarrativeField::new(key, label, text))
        })
        .collect()
    }

    fn nature(&self) -> &'static str {
        "משמורת קטינים והסדרי שהות"
    }

    fn disputed_value(&self, _ctx: &ComposeContext<'_>) -> String {
        NOT_ASSESSABLE.to_string()
    }

    fn remedy_summary(&self, ctx: &ComposeContext<'_>) -> String {
        match arrangement(ctx) {
            Some(Arrangement::Joint) => format!(
                "קביעת משמורת משותפת של הצדדים על {} והסדרי שהות בהתאם",
                minors(ctx)
            ),
            _ => format!(
                "קביעת משמורת {} על {} וקביעת הסדרי שהות עם {}",
                ctx.claimant.title,
                minors(ctx),
                ctx.respondent.title
            ),
        }
    }

    fn governing_law(&self, _ctx: &ComposeContext<'_>) -> &'static str {
        "חוק הכשרות המשפטית והאפוטרופסות, התשכ\"ב-1962"
    }

    fn facts_summary(&self, ctx: &ComposeContext<'_>) -> String {
        format!(
            "טובתם של {} מחייבת הסדרת משמורתם והסדרי השהות שלהם עם כל אחד מההורים, ו{} {} כי ההסדר המבוקש משרת את טובתם.",
            minors(ctx),
            ctx.claimant.title,
            ctx.claimant.pick("סבור", "סבורה")
        )
    }

    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node> {
        let style = ctx.style();
        let answers = answers(ctx);
        let arrangement_label = match arrangement(ctx) {
            Some(Arrangement::Sole) => "משמורת בלעדית",
            Some(Arrangement::Joint) => "משמורת משותפת",
            None => NOT_SPECIFIED,
        };

        let mut nodes = vec![
            format::subsection_header(style, "מצב המשמורת כיום"),
            format::labeled_line(
                &format!("{} מתגוררים כיום אצל", minors(ctx)),
                ctx.owner_label(answers.and_then(|a| a.children_live_with.as_deref())),
            ),
            format::labeled_line("ההסדר המבוקש", arrangement_label),
            format::subsection_header(style, "הסדרי השהות המוצעים"),
            format::paragraph(
                ctx.narrative(VISITATION, answers.and_then(|a| a.proposed_visitation.as_deref()))
                    .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            ),
        ];

        if let Some(reasons) =
            ctx.narrative(REASONS, answers.and_then(|a| a.reasons.as_deref()))
        {
            nodes.push(format::subsection_header(style, "טובת הקטינים"));
            nodes.push(format::paragraph(reasons));
        }
        nodes
    }

    fn remedies(&self, ctx: &ComposeContext<'_>) -> Vec<Remedy> {
        let custody = match arrangement(ctx) {
            Some(Arrangement::Joint) => format!(
                "לקבוע כי {} יהיו במשמורת משותפת של שני הצדדים.",
                minors(ctx)
            ),
            _ => format!(
                "לקבוע כי {} יהיו במשמורת{} של {}.",
                minors(ctx),
                ctx.claimant.pick("ו", "ה"),
                ctx.claimant.titled_name()
            ),
        };
        vec![
            Remedy::claim(custody),
            Remedy::claim(format!(
                "לקבוע הסדרי שהות בין {} לבין {} בהתאם לטובתם.",
                minors(ctx),
                ctx.respondent.title
            )),
            Remedy::claim(
                "ככל שיידרש, להורות על הגשת תסקיר של עובד סוציאלי לסדרי דין בעניין הקטינים.",
            ),
            Remedy::claim(format!(
                "לחייב את {} בהוצאות המשפט ובשכר טרחת עורך דין.",
                ctx.respondent.title
            )),
        ]
    }
}

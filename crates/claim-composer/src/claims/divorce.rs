use shared_types::{non_blank, CaseRecord, ClaimType, DivorceAnswers, Node};

use super::DocumentComposer;
use crate::context::ComposeContext;
use crate::format::{self, or_not_specified, yes_no, NOT_SPECIFIED};
use crate::remedies::Remedy;
use crate::transformer::NarrativeField;

const WHO_WANTS_DIVORCE: &str = "whoWantsDivorce";
const GROUNDS: &str = "grounds";
const RECONCILIATION: &str = "reconciliationDetails";

pub struct DivorceComposer;

fn answers<'c>(ctx: &'c ComposeContext<'_>) -> Option<&'c DivorceAnswers> {
    ctx.case.divorce.as_ref()
}

impl DocumentComposer for DivorceComposer {
    fn claim(&self) -> ClaimType {
        ClaimType::Divorce
    }

    fn narrative_fields(&self, case: &CaseRecord) -> Vec<NarrativeField> {
        let Some(answers) = case.divorce.as_ref() else {
            return Vec::new();
        };
        [
            (WHO_WANTS_DIVORCE, "מי מבקש את הגירושין ומדוע", &answers.who_wants_divorce),
            (GROUNDS, "עילות הגירושין", &answers.grounds),
            (RECONCILIATION, "ניסיונות שלום בית", &answers.reconciliation_details),
        ]
        .into_iter()
        .filter_map(|(key, label, text)| {
            non_blank(text.as_deref()).map(|text| NarrativeField::new(key, label, text))
        })
        .collect()
    }

    fn nature(&self) -> &'static str {
        "התרת נישואין"
    }

    fn remedy_summary(&self, _ctx: &ComposeContext<'_>) -> String {
        "מתן פסק דין להתרת הנישואין בין הצדדים".to_string()
    }

    fn governing_law(&self, _ctx: &ComposeContext<'_>) -> &'static str {
        "חוק שיפוט בענייני התרת נישואין (מקרים מיוחדים ושיפוט בינלאומי), התשכ\"ט-1969"
    }

    fn facts_summary(&self, ctx: &ComposeContext<'_>) -> String {
        format!(
            "הקשר בין הצדדים עלה על שרטון באופן סופי, אין עוד סיכוי לשלום בית, ו{} {} להתיר את נישואי הצדדים.",
            ctx.claimant.title,
            ctx.claimant.pick("עותר", "עותרת")
        )
    }

    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node> {
        let style = ctx.style();
        let answers = answers(ctx);
        let field = |key: &str, original: Option<&String>| {
            ctx.narrative(key, original.map(String::as_str))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };

        let mut nodes = vec![
            format::subsection_header(style, "הרצון בגירושין"),
            format::paragraph(field(
                WHO_WANTS_DIVORCE,
                answers.and_then(|a| a.who_wants_divorce.as_ref()),
            )),
            format::subsection_header(style, "עילות הגירושין"),
            format::paragraph(field(GROUNDS, answers.and_then(|a| a.grounds.as_ref()))),
            format::subsection_header(style, "ניסיונות שלום בית"),
        ];

        let attempts = answers.and_then(|a| a.reconciliation_attempts);
        nodes.push(format::labeled_line(
            "האם נעשו ניסיונות לשלום בית",
            attempts.map(yes_no).unwrap_or(NOT_SPECIFIED),
        ));
        if attempts == Some(true) {
            nodes.push(format::paragraph(field(
                RECONCILIATION,
                answers.and_then(|a| a.reconciliation_details.as_ref()),
            )));
        }
        nodes.push(format::paragraph(format!(
            "בנסיבות אלה {} כי לא ניתן לשקם את הקשר בין הצדדים.",
            ctx.claimant.pick("סבור התובע", "סבורה התובעת")
        )));
        nodes
    }

    fn remedies(&self, ctx: &ComposeContext<'_>) -> Vec<Remedy> {
        vec![
            Remedy::claim("להורות על התרת הנישואין בין הצדדים."),
            Remedy::claim(format!(
                "להורות על רישום הגירושין במרשם האוכלוסין, ולחייב את {} לשתף פעולה בכל הנדרש לשם כך.",
                ctx.respondent.title
            )),
            Remedy::claim(format!(
                "לחייב את {}, {}, בהוצאות המשפט ובשכר טרחת עורך דין.",
                ctx.respondent.title,
                or_not_specified(ctx.case.respondent.full_name.as_deref())
            )),
        ]
    }
}

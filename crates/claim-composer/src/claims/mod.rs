//! Per-claim document composers
//!
//! Every claim type shares one document skeleton. A composer only supplies
//! the claim-specific clauses; [`compose_document`] assembles them in the
//! fixed section order.

mod alimony;
mod custody;
mod divorce;
mod divorce_agreement;
mod property;

pub use alimony::AlimonyComposer;
pub use custody::CustodyComposer;
pub use divorce::DivorceComposer;
pub use divorce_agreement::DivorceAgreementComposer;
pub use property::PropertyComposer;

use shared_types::{non_blank, CaseRecord, ClaimType, Document, Node, Run, Sex};
use tracing::info;

use crate::context::ComposeContext;
use crate::format::{self, date_or_not_specified, format_currency, format_naive_date};
use crate::gender::Role;
use crate::remedies::{self, Remedy};
use crate::sections::{self, AttachmentPlan};
use crate::transformer::NarrativeField;

/// Disputed-value wording for claims without a computed amount
pub const UNSPECIFIED_AMOUNT: &str = "סכום בלתי קצוב";

/// Disputed-value wording for claims that cannot be valued
pub const NOT_ASSESSABLE: &str = "לא ניתן להערכה";

/// Claim-specific content of a claim document
pub trait DocumentComposer: Send + Sync {
    fn claim(&self) -> ClaimType;

    /// Free-text fields routed through the legal-language transformer
    fn narrative_fields(&self, _case: &CaseRecord) -> Vec<NarrativeField> {
        Vec::new()
    }

    /// Fixed "nature of claim" line
    fn nature(&self) -> &'static str;

    fn disputed_value(&self, _ctx: &ComposeContext<'_>) -> String {
        UNSPECIFIED_AMOUNT.to_string()
    }

    /// One-sentence summary of the requested remedies
    fn remedy_summary(&self, ctx: &ComposeContext<'_>) -> String;

    /// Statute or doctrine the remedy summary relies on
    fn governing_law(&self, ctx: &ComposeContext<'_>) -> &'static str {
        property_regime(ctx)
    }

    /// Fact summary for the "main arguments" block
    fn facts_summary(&self, ctx: &ComposeContext<'_>) -> String;

    /// Claim-specific part of the detailed facts, after the relationship narrative
    fn detailed_facts(&self, ctx: &ComposeContext<'_>) -> Vec<Node>;

    /// Requested remedies in printed order
    fn remedies(&self, ctx: &ComposeContext<'_>) -> Vec<Remedy>;

    /// Itemized entries that lengthen the claim body
    fn itemized_count(&self, _ctx: &ComposeContext<'_>) -> usize {
        0
    }
}

/// Composers indexed by claim type, in [`ClaimType::ALL`] order
static COMPOSERS: [&dyn DocumentComposer; 5] = [
    &PropertyComposer,
    &CustodyComposer,
    &AlimonyComposer,
    &DivorceComposer,
    &DivorceAgreementComposer,
];

pub fn composer_for(claim: ClaimType) -> &'static dyn DocumentComposer {
    COMPOSERS[claim as usize]
}

/// Matrimonial-property statute for legally married parties, the
/// cohabitant-property doctrine otherwise
pub fn property_regime(ctx: &ComposeContext<'_>) -> &'static str {
    if ctx.case.relationship.is_legally_married() {
        "חוק יחסי ממון בין בני זוג, התשל\"ג-1973"
    } else {
        "הלכת השיתוף בנכסים החלה על ידועים בציבור"
    }
}

/// Build the full claim document: claim body, statement of details, power
/// of attorney, affidavit and the optional attachments appendix
pub fn compose_document(composer: &dyn DocumentComposer, ctx: &ComposeContext<'_>) -> Document {
    let style = ctx.style();
    let claim = ctx.claim;
    info!(claim = %claim, "Composing claim document");

    let mut doc = Document::new(
        format!("{} - {}", claim.label(), ctx.claimant.name),
        style.clone(),
    );

    doc.extend(format::court_header(
        style,
        ctx.court_city(),
        (&ctx.case.claimant, &ctx.claimant),
        (&ctx.case.respondent, &ctx.respondent),
        ctx.case.lawyer.as_ref(),
    ));

    doc.push(format::title(style, format!("כתב {}", claim_heading(claim))));
    doc.push(format::labeled_line("מהות התביעה", composer.nature()));
    doc.push(format::labeled_line("סכום התביעה", composer.disputed_value(ctx)));
    doc.push(fee_line(ctx));

    let remedy_summary = format!(
        "{}, בהתאם ל{}.",
        composer.remedy_summary(ctx),
        composer.governing_law(ctx)
    );
    doc.push(format::paragraph_runs(vec![
        Run::bold("הסעד המבוקש: "),
        Run::plain(remedy_summary.clone()),
    ]));

    doc.extend(summons(ctx));

    // Main arguments
    doc.push(format::section_header(style, "תמצית טענות"));
    doc.push(format::numbered(1, parties_description(ctx)));
    doc.extend(children_list(ctx));
    doc.push(format::numbered(2, remedy_summary));
    doc.push(format::numbered(3, composer.facts_summary(ctx)));
    doc.push(format::numbered(
        4,
        "לבית המשפט הנכבד הסמכות העניינית לדון בתביעה מכוח חוק בית המשפט לענייני משפחה, התשנ\"ה-1995, והסמכות המקומית, שכן מקום מגוריהם של הצדדים או של הקטינים מצוי בתחום שיפוטו.",
    ));

    // Detailed facts
    doc.push(format::section_header(style, "פירוט העובדות"));
    doc.extend(sections::relationship_narrative(ctx));
    doc.extend(composer.detailed_facts(ctx));

    // Remedies
    doc.push(format::section_header(style, "הסעדים המבוקשים"));
    doc.push(format::paragraph("אשר על כן, מתבקש בית המשפט הנכבד:"));
    doc.extend(remedies::render(&remedies::sequence(composer.remedies(ctx))));

    let plan = (!ctx.case.attachments.is_empty())
        .then(|| AttachmentPlan::estimate(ctx, composer.itemized_count(ctx)));
    if let Some(plan) = &plan {
        doc.extend(sections::attachment_index(ctx, plan));
    }

    doc.push(format::labeled_line("תאריך", format_naive_date(ctx.today)));
    doc.extend(format::signature_block(
        style,
        ctx.case.signatures.client.as_ref(),
        &ctx.claimant.name,
    ));

    doc.push(Node::PageBreak);
    doc.extend(sections::statement_of_details(ctx));

    doc.push(Node::PageBreak);
    doc.extend(sections::power_of_attorney(ctx));

    doc.push(Node::PageBreak);
    doc.extend(sections::affidavit(ctx));

    if plan.is_some() {
        doc.push(Node::PageBreak);
        doc.extend(sections::attachments_section(ctx));
    }

    info!(claim = %claim, nodes = doc.nodes.len(), "Claim document composed");
    doc
}

fn claim_heading(claim: ClaimType) -> &'static str {
    match claim {
        ClaimType::Property => "תביעה רכושית",
        ClaimType::Custody => "תביעה למשמורת והסדרי שהות",
        ClaimType::Alimony => "תביעה למזונות",
        ClaimType::Divorce => "תביעה לגירושין",
        ClaimType::DivorceAgreement => "בקשה לאישור הסכם גירושין",
    }
}

fn fee_line(ctx: &ComposeContext<'_>) -> Node {
    let fees = &ctx.config.court_fees;
    match fees.for_claim(ctx.claim) {
        0 => format::labeled_line(
            "אגרה",
            format!("התביעה פטורה מתשלום אגרה לפי {}", fees.citation),
        ),
        amount => format::labeled_line(
            "אגרה",
            format!("{} לפי {}", format_currency(amount as i64), fees.citation),
        ),
    }
}

fn summons(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let respondent = ctx.terms(Role::Respondent);
    vec![
        format::section_header(ctx.style(), "הזמנה לדין"),
        format::paragraph(format!(
            "הואיל ו{} {} נגדך {} כמפורט בכתב זה, {} בזה להגיש כתב הגנה תוך 30 ימים מיום שהומצא לך כתב התביעה, בהתאם לתקנות בית המשפט לענייני משפחה (סדרי דין), התשפ\"א-2020 ולתקנות סדר הדין האזרחי, התשע\"ט-2018.",
            ctx.claimant.title,
            ctx.claimant.pick("הגיש", "הגישה"),
            ctx.claim.label(),
            respondent.pick("הנך מוזמן", "הנך מוזמנת")
        )),
        format::paragraph(format!(
            "לתשומת לב {}: אם לא {} כתב הגנה במועד, {} {} לקבל פסק דין שלא בפניך.",
            respondent.title,
            respondent.pick("תגיש", "תגישי"),
            ctx.claimant.pick("יהיה", "תהיה"),
            format!(
                "{} {}",
                ctx.claimant.title,
                ctx.claimant.pick("רשאי", "רשאית")
            )
        )),
    ]
}

fn parties_description(ctx: &ComposeContext<'_>) -> String {
    let children = ctx.case.children.len();
    let children_sentence = match children {
        0 => "לצדדים אין ילדים משותפים.".to_string(),
        1 => "לצדדים ילד משותף אחד:".to_string(),
        n => format!("לצדדים {} ילדים משותפים:", n),
    };
    format!(
        "{} ו{} הם {}. {}",
        ctx.claimant.titled_name(),
        ctx.respondent.titled_name(),
        if ctx.case.relationship.is_legally_married() {
            "בני זוג נשואים"
        } else {
            "בני זוג ידועים בציבור"
        },
        children_sentence
    )
}

fn children_list(ctx: &ComposeContext<'_>) -> Vec<Node> {
    ctx.case
        .children
        .iter()
        .map(|child| {
            let name = child
                .full_name()
                .unwrap_or_else(|| format::NOT_SPECIFIED.to_string());
            let born = match child.sex {
                Some(Sex::Male) => "נולד",
                Some(Sex::Female) => "נולדה",
                None => "נולד/ה",
            };
            let mut line = format!(
                "{}, {} ביום {}",
                name,
                born,
                date_or_not_specified(child.birth_date.as_deref())
            );
            if let Some(id) = non_blank(child.id_number.as_deref()) {
                line.push_str(&format!(", ת.ז. {}", id));
            }
            format::bullet(line)
        })
        .collect()
}

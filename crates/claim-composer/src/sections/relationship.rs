//! Relationship narrative
//!
//! Identical wording for every claim type: status, wedding date, separation
//! date and a neutral account of the breakdown.

use shared_types::{non_blank, MaritalStatus, Node};

use crate::context::ComposeContext;
use crate::format::{self, format_date};

pub fn relationship_narrative(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let relationship = &ctx.case.relationship;
    let wedding = non_blank(relationship.wedding_date.as_deref()).map(format_date);
    let start = non_blank(relationship.relationship_start_date.as_deref()).map(format_date);
    let separation = non_blank(relationship.separation_date.as_deref()).map(format_date);

    let status = match (relationship.marital_status, &wedding) {
        (Some(MaritalStatus::Cohabiting), _) => match &start {
            Some(date) => format!(
                "הצדדים חיו יחד כבני זוג ידועים בציבור החל מיום {} וניהלו משק בית משותף.",
                date
            ),
            None => "הצדדים חיו יחד כבני זוג ידועים בציבור וניהלו משק בית משותף.".to_string(),
        },
        (Some(MaritalStatus::Divorced), Some(date)) => format!(
            "הצדדים נישאו זה לזה ביום {} וכיום הם גרושים זה מזה.",
            date
        ),
        (Some(MaritalStatus::Divorced), None) => "הצדדים גרושים זה מזה.".to_string(),
        (_, Some(date)) => format!("הצדדים נישאו זה לזה ביום {}.", date),
        (Some(MaritalStatus::Married), None) | (Some(MaritalStatus::Separated), None) => {
            "הצדדים נשואים זה לזה.".to_string()
        }
        (None, None) => format!("מצבם האישי של הצדדים: {}.", format::NOT_SPECIFIED),
    };

    let mut nodes = vec![format::paragraph(status)];

    if ctx.case.relationship.marital_status != Some(MaritalStatus::Cohabiting) {
        if let Some(date) = &start {
            nodes.push(format::paragraph(format!(
                "מערכת היחסים בין הצדדים החלה ביום {}.",
                date
            )));
        }
    }

    nodes.push(format::paragraph(
        "במהלך השנים חלה הידרדרות ביחסים בין הצדדים, ולאחר ניסיונות שלא צלחו הגיעו הצדדים למסקנה כי לא ניתן להמשיך את החיים המשותפים.",
    ));

    nodes.push(format::paragraph(match &separation {
        Some(date) => format!(
            "ביום {} נפרדו הצדדים, ומאז הם מתגוררים בנפרד.",
            date
        ),
        None => "מועד הפרידה בין הצדדים לא צוין.".to_string(),
    }));

    nodes
}

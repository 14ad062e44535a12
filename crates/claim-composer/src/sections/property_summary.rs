//! Property inventory section of a property claim

use shared_types::{non_blank, Node, PropertyAnswers};

use crate::context::ComposeContext;
use crate::format::{self, date_or_not_specified, format_currency, or_not_specified};
use crate::property::{CategorySummary, PropertySummary};

/// One subsection per non-empty category: items, a bold total line and,
/// when ownership is mixed, a per-owner breakdown
pub fn property_summary(
    ctx: &ComposeContext<'_>,
    answers: &PropertyAnswers,
    summary: &PropertySummary,
) -> Vec<Node> {
    let style = ctx.style();
    let mut nodes = Vec::new();

    for category_summary in &summary.categories {
        let category = category_summary.category;
        nodes.push(format::subsection_header(style, category.heading()));

        for item in category.items(answers) {
            let value = match item.value.as_ref().map(|v| v.as_str()) {
                Some(text) if non_blank(Some(text)).is_some() && item.coerced_value() > 0 => {
                    format_currency(item.coerced_value())
                }
                other => or_not_specified(other).to_string(),
            };
            let mut line = format!(
                "{}, {}: {}, {}: {}",
                or_not_specified(item.description.as_deref()),
                category.value_label(),
                value,
                category.ownership_label(),
                ctx.owner_label(item.owner.as_deref())
            );
            if non_blank(item.purchase_date.as_deref()).is_some() {
                line.push_str(&format!(
                    ", מועד רכישה: {}",
                    date_or_not_specified(item.purchase_date.as_deref())
                ));
            }
            nodes.push(format::bullet(line));
        }

        nodes.push(format::bold_line(format!(
            "{}: {}",
            category.total_label(),
            format_currency(category_summary.total)
        )));

        if category_summary.needs_breakdown() {
            nodes.extend(ownership_breakdown(ctx, category_summary));
        }
    }

    nodes
}

fn ownership_breakdown(ctx: &ComposeContext<'_>, summary: &CategorySummary) -> Vec<Node> {
    let mut nodes = vec![format::paragraph(format!(
        "פילוח לפי {}:",
        if summary.category.is_liability() {
            "חייב"
        } else {
            "בעלות"
        }
    ))];
    for group in &summary.groups {
        nodes.push(format::bullet(format!(
            "{} {}: {} ({} {})",
            summary.category.ownership_label(),
            ctx.owner_label(group.owner.as_deref()),
            format_currency(group.total),
            group.count,
            if group.count == 1 { "פריט" } else { "פריטים" }
        )));
    }
    nodes
}

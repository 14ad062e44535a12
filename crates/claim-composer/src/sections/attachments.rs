//! Attachments appendix and the exhibit index that refers to it
//!
//! Page numbers are estimates used for cross-references only; real
//! pagination is up to the serializer.

use shared_types::{non_blank, Align, Cell, Image, Node, Table};
use tracing::{debug, warn};

use crate::context::ComposeContext;
use crate::format;

/// Estimated placement of the attachments section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPlan {
    /// Page on which the attachments section begins
    pub start_page: u32,
    /// Estimated first page of each attachment, in attachment order
    pub pages: Vec<u32>,
}

fn div_ceil(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    value.div_ceil(divisor)
}

impl AttachmentPlan {
    /// Estimate where the attachments start
    ///
    /// base pages + ceil(items / items_per_page) + ceil(children /
    /// children_per_page) + statement + POA + affidavit, then one page per
    /// image of every preceding attachment.
    pub fn estimate(ctx: &ComposeContext<'_>, itemized_count: usize) -> Self {
        let pages = &ctx.config.pages;
        let preceding = pages.base_for(ctx.claim)
            + div_ceil(itemized_count as u32, pages.items_per_page)
            + div_ceil(ctx.case.children.len() as u32, pages.children_per_page)
            + pages.statement_pages
            + pages.power_of_attorney_pages
            + pages.affidavit_pages;
        let start_page = preceding + 1;

        let mut next = start_page;
        let mut attachment_pages = Vec::with_capacity(ctx.case.attachments.len());
        for attachment in &ctx.case.attachments {
            attachment_pages.push(next);
            next += attachment.images.len().max(1) as u32;
        }

        debug!(
            claim = %ctx.claim,
            itemized_count,
            start_page,
            "Estimated attachments placement"
        );

        Self {
            start_page,
            pages: attachment_pages,
        }
    }
}

/// Exhibit index printed inside the claim
pub fn attachment_index(ctx: &ComposeContext<'_>, plan: &AttachmentPlan) -> Vec<Node> {
    let mut table = Table::new(vec![1, 5, 1]).row(vec![
        Cell::header("נספח"),
        Cell::header("תיאור"),
        Cell::header("עמוד"),
    ]);
    for (attachment, page) in ctx.case.attachments.iter().zip(&plan.pages) {
        table.push_row(vec![
            Cell::text(attachment.label.clone()),
            Cell::text(format::or_not_specified(attachment.description.as_deref())),
            Cell::text(page.to_string()),
        ]);
    }
    vec![
        format::section_header(ctx.style(), "רשימת נספחים"),
        Node::Table(table),
    ]
}

/// Appendix with each attachment's heading, description and images
///
/// Attachments after the first start on a new page.
pub fn attachments_section(ctx: &ComposeContext<'_>) -> Vec<Node> {
    let style = ctx.style();
    let mut nodes = Vec::new();

    for (i, attachment) in ctx.case.attachments.iter().enumerate() {
        if i > 0 {
            nodes.push(Node::PageBreak);
        }
        nodes.push(format::title(style, format!("נספח {}", attachment.label)));
        if let Some(description) = non_blank(attachment.description.as_deref()) {
            nodes.push(format::paragraph(description));
        }
        for (index, image) in attachment.images.iter().enumerate() {
            match image.decode() {
                Some(data) => nodes.push(Node::Image(Image {
                    data,
                    width_mm: style.attachment_width_mm,
                    align: Align::Center,
                })),
                None => warn!(
                    attachment = %attachment.label,
                    index,
                    "Attachment image could not be decoded, skipping"
                ),
            }
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use shared_types::{Attachment, CaseRecord, Child, ClaimType, ImageData, Party};

    fn case_with(attachments: Vec<Attachment>, children: usize) -> CaseRecord {
        CaseRecord {
            claimant: Party {
                full_name: Some("דנה".to_string()),
                ..Default::default()
            },
            children: vec![Child::default(); children],
            attachments,
            ..Default::default()
        }
    }

    fn attachment(label: &str, images: usize) -> Attachment {
        Attachment {
            label: label.to_string(),
            description: Some(format!("מסמך {}", label)),
            images: vec![ImageData::Bytes(vec![0xFF, 0xD8, 0xFF]); images],
        }
    }

    #[test]
    fn test_page_estimate() {
        let case = case_with(vec![attachment("א", 2), attachment("ב", 1)], 4);
        let config = EngineConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ctx = ComposeContext::new(&case, &config, ClaimType::Property, today).unwrap();

        // 5 base + ceil(9/8)=2 + ceil(4/3)=2 + 3 statement + 1 POA + 1 affidavit
        let plan = AttachmentPlan::estimate(&ctx, 9);
        assert_eq!(plan.start_page, 15);
        assert_eq!(plan.pages, vec![15, 17]);
    }

    #[test]
    fn test_index_and_section() {
        let case = case_with(vec![attachment("א", 2), attachment("ב", 0)], 0);
        let config = EngineConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ctx = ComposeContext::new(&case, &config, ClaimType::Divorce, today).unwrap();
        let plan = AttachmentPlan::estimate(&ctx, 0);

        let index = attachment_index(&ctx, &plan);
        assert_eq!(index[1].text().lines().nth(1), Some("א | מסמך א | 10"));

        let section = attachments_section(&ctx);
        let images = section.iter().filter(|n| matches!(n, Node::Image(_))).count();
        assert_eq!(images, 2);
        assert_eq!(section.iter().filter(|n| matches!(n, Node::PageBreak)).count(), 1);
        assert_eq!(section[0].text(), "נספח א");
    }

    #[test]
    fn test_undecodable_image_is_skipped() {
        let mut broken = attachment("ג", 0);
        broken.images = vec![ImageData::Base64(String::new())];
        let case = case_with(vec![broken], 0);
        let config = EngineConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ctx = ComposeContext::new(&case, &config, ClaimType::Divorce, today).unwrap();
        assert!(!attachments_section(&ctx)
            .iter()
            .any(|n| matches!(n, Node::Image(_))));
    }
}

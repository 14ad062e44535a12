//! Property aggregation
//!
//! Sums each inventory category and groups it by declared owner. The same
//! algorithm serves assets and debts; only the wording differs.

use shared_types::{non_blank, PropertyAnswers, PropertyItem};

/// Owner token meaning "owned by both parties"
pub const JOINT_OWNER: &str = "both";

/// Inventory categories in the order they appear in a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Apartments,
    Vehicles,
    Savings,
    Benefits,
    Properties,
    Debts,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Apartments,
        Category::Vehicles,
        Category::Savings,
        Category::Benefits,
        Category::Properties,
        Category::Debts,
    ];

    pub fn is_liability(&self) -> bool {
        matches!(self, Category::Debts)
    }

    /// Subsection heading
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Apartments => "דירות ומקרקעין",
            Category::Vehicles => "כלי רכב",
            Category::Savings => "חסכונות וחשבונות בנק",
            Category::Benefits => "זכויות סוציאליות ופנסיוניות",
            Category::Properties => "נכסים נוספים",
            Category::Debts => "חובות והתחייבויות",
        }
    }

    /// Label used in the bold total line
    pub fn total_label(&self) -> &'static str {
        match self {
            Category::Apartments => "סך כל שווי הדירות",
            Category::Vehicles => "סך כל שווי כלי הרכב",
            Category::Savings => "סך כל החסכונות",
            Category::Benefits => "סך כל הזכויות הסוציאליות",
            Category::Properties => "סך כל שווי הנכסים הנוספים",
            Category::Debts => "סך כל החובות",
        }
    }

    /// "שווי" for assets, "סכום" for debts
    pub fn value_label(&self) -> &'static str {
        if self.is_liability() {
            "סכום החוב"
        } else {
            "שווי"
        }
    }

    /// "owned by" vs "owed by"
    pub fn ownership_label(&self) -> &'static str {
        if self.is_liability() {
            "חוב של"
        } else {
            "בבעלות"
        }
    }

    pub fn items<'a>(&self, answers: &'a PropertyAnswers) -> &'a [PropertyItem] {
        match self {
            Category::Apartments => &answers.apartments,
            Category::Vehicles => &answers.vehicles,
            Category::Savings => &answers.savings,
            Category::Benefits => &answers.benefits,
            Category::Properties => &answers.properties,
            Category::Debts => &answers.debts,
        }
    }
}

/// Per-owner subtotal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerGroup {
    /// Declared owner, trimmed; `None` when no owner or a blank one was given
    pub owner: Option<String>,
    pub total: i64,
    pub count: usize,
}

impl OwnerGroup {
    pub fn is_joint(&self) -> bool {
        self.owner.as_deref() == Some(JOINT_OWNER)
    }
}

/// Aggregate of one inventory category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub total: i64,
    pub item_count: usize,
    /// Joint-owner group first, then the others in first-seen order
    pub groups: Vec<OwnerGroup>,
}

impl CategorySummary {
    /// Summarize a category's items
    pub fn from_items(category: Category, items: &[PropertyItem]) -> Self {
        let mut groups: Vec<OwnerGroup> = Vec::new();
        let mut total = 0i64;

        for item in items {
            let value = item.coerced_value();
            total = total.saturating_add(value);

            // Blank and absent owners share one group
            let owner = non_blank(item.owner.as_deref());
            match groups.iter_mut().find(|g| g.owner.as_deref() == owner) {
                Some(group) => {
                    group.total = group.total.saturating_add(value);
                    group.count += 1;
                }
                None => groups.push(OwnerGroup {
                    owner: owner.map(str::to_string),
                    total: value,
                    count: 1,
                }),
            }
        }

        // Stable sort keeps first-seen order among non-joint owners
        groups.sort_by_key(|group| !group.is_joint());

        Self {
            category,
            total,
            item_count: items.len(),
            groups,
        }
    }

    /// A breakdown is printed unless everything belongs to both parties
    pub fn needs_breakdown(&self) -> bool {
        match self.groups.as_slice() {
            [] => false,
            [single] => !single.is_joint(),
            _ => true,
        }
    }
}

/// Aggregates of every non-empty category of a property claim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertySummary {
    pub categories: Vec<CategorySummary>,
}

impl PropertySummary {
    pub fn from_answers(answers: &PropertyAnswers) -> Self {
        let categories = Category::ALL
            .iter()
            .filter_map(|category| {
                let items = category.items(answers);
                if items.is_empty() {
                    None
                } else {
                    Some(CategorySummary::from_items(*category, items))
                }
            })
            .collect();
        Self { categories }
    }

    pub fn category(&self, category: Category) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Number of itemized entries across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.item_count).sum()
    }

    /// Sum of all asset categories
    pub fn asset_total(&self) -> i64 {
        self.categories
            .iter()
            .filter(|c| !c.category.is_liability())
            .map(|c| c.total)
            .sum()
    }

    pub fn debt_total(&self) -> i64 {
        self.category(Category::Debts).map(|c| c.total).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::AmountText;

    fn item(value: &str, owner: Option<&str>) -> PropertyItem {
        PropertyItem {
            description: Some("פריט".to_string()),
            value: Some(AmountText::new(value)),
            owner: owner.map(str::to_string),
            purchase_date: None,
        }
    }

    #[test]
    fn test_total_of_two_apartments() {
        let items = vec![item("3200000", Some("both")), item("2800000", Some("both"))];
        let summary = CategorySummary::from_items(Category::Apartments, &items);
        assert_eq!(summary.total, 6_000_000);
        assert_eq!(summary.groups.len(), 1);
        assert!(!summary.needs_breakdown());
    }

    #[test]
    fn test_unparseable_value_counts_as_zero() {
        let items = vec![item("not a number", Some("both")), item("1000", Some("both"))];
        let summary = CategorySummary::from_items(Category::Savings, &items);
        assert_eq!(summary.total, 1000);
        assert_eq!(summary.groups[0].count, 2);
    }

    #[test]
    fn test_joint_group_sorted_first() {
        let items = vec![
            item("100", Some("claimant")),
            item("200", None),
            item("300", Some("both")),
            item("400", Some("claimant")),
        ];
        let summary = CategorySummary::from_items(Category::Vehicles, &items);
        assert_eq!(
            summary.groups,
            vec![
                OwnerGroup {
                    owner: Some("both".to_string()),
                    total: 300,
                    count: 1
                },
                OwnerGroup {
                    owner: Some("claimant".to_string()),
                    total: 500,
                    count: 2
                },
                OwnerGroup {
                    owner: None,
                    total: 200,
                    count: 1
                },
            ]
        );
        assert!(summary.needs_breakdown());
    }

    #[test]
    fn test_owner_match_is_case_sensitive() {
        let items = vec![item("1", Some("Both")), item("2", Some("both"))];
        let summary = CategorySummary::from_items(Category::Properties, &items);
        assert_eq!(summary.groups.len(), 2);
        assert!(summary.groups[0].is_joint());
    }

    #[test]
    fn test_blank_owner_joins_the_unspecified_group() {
        let items = vec![
            item("100", None),
            item("200", Some("")),
            item("300", Some("   ")),
            item("400", Some(" claimant ")),
            item("500", Some("claimant")),
        ];
        let summary = CategorySummary::from_items(Category::Savings, &items);
        assert_eq!(
            summary.groups,
            vec![
                OwnerGroup {
                    owner: None,
                    total: 600,
                    count: 3
                },
                OwnerGroup {
                    owner: Some("claimant".to_string()),
                    total: 900,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_single_non_joint_owner_needs_breakdown() {
        let items = vec![item("50000", Some("respondent"))];
        let summary = CategorySummary::from_items(Category::Debts, &items);
        assert!(summary.needs_breakdown());
    }

    #[test]
    fn test_empty_categories_are_skipped() {
        let answers = PropertyAnswers {
            apartments: vec![item("1", Some("both"))],
            debts: vec![item("5", Some("both"))],
            ..Default::default()
        };
        let summary = PropertySummary::from_answers(&answers);
        let categories: Vec<Category> = summary.categories.iter().map(|c| c.category).collect();
        assert_eq!(categories, vec![Category::Apartments, Category::Debts]);
        assert_eq!(summary.item_count(), 2);
        assert_eq!(summary.asset_total(), 1);
        assert_eq!(summary.debt_total(), 5);
    }
}

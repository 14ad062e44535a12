//! Property-based tests for aggregation and remedy numbering

use claim_composer::gender::{GenderTerms, Role};
use claim_composer::property::{Category, CategorySummary};
use claim_composer::remedies::{property_remedies, sequence, IncomeDisparity, RemedyKind};
use proptest::prelude::*;
use shared_types::{AmountText, PropertyItem, Sex};

fn value_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..10_000_000).prop_map(|v| v.to_string()),
        (0i64..10_000_000).prop_map(|v| format!("{} ₪", v)),
        "[a-zא-ת ]{0,12}",
        Just(String::new()),
    ]
}

fn owner() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
        Just(Some("both".to_string())),
        Just(Some("Both".to_string())),
        Just(Some("claimant".to_string())),
        Just(Some("respondent".to_string())),
        "[a-z]{1,6}".prop_map(Some),
    ]
}

fn items() -> impl Strategy<Value = Vec<PropertyItem>> {
    prop::collection::vec(
        (value_text(), owner()).prop_map(|(value, owner)| PropertyItem {
            description: None,
            value: Some(AmountText::new(value)),
            owner,
            purchase_date: None,
        }),
        0..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn total_is_sum_of_coerced_values(items in items()) {
        let summary = CategorySummary::from_items(Category::Savings, &items);
        let expected: i64 = items.iter().map(PropertyItem::coerced_value).sum();
        prop_assert_eq!(summary.total, expected);
        prop_assert_eq!(summary.item_count, items.len());
    }

    #[test]
    fn group_totals_add_up_to_category_total(items in items()) {
        let summary = CategorySummary::from_items(Category::Debts, &items);
        let group_sum: i64 = summary.groups.iter().map(|g| g.total).sum();
        let group_count: usize = summary.groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(group_sum, summary.total);
        prop_assert_eq!(group_count, items.len());
    }

    #[test]
    fn owner_groups_are_distinct_and_never_blank(items in items()) {
        let summary = CategorySummary::from_items(Category::Vehicles, &items);
        let unspecified = summary.groups.iter().filter(|g| g.owner.is_none()).count();
        prop_assert!(unspecified <= 1);
        prop_assert!(summary
            .groups
            .iter()
            .all(|g| g.owner.as_deref().map(|o| !o.trim().is_empty()).unwrap_or(true)));
        for (i, group) in summary.groups.iter().enumerate() {
            prop_assert!(summary.groups[i + 1..].iter().all(|other| other.owner != group.owner));
        }
    }

    #[test]
    fn joint_group_is_first_when_present(items in items()) {
        let summary = CategorySummary::from_items(Category::Apartments, &items);
        let has_joint = items.iter().any(|i| i.owner.as_deref() == Some("both"));
        prop_assert_eq!(summary.groups.first().map(|g| g.is_joint()).unwrap_or(false), has_joint);
        prop_assert!(summary.groups.iter().skip(1).all(|g| !g.is_joint()));
    }

    #[test]
    fn remedy_numbers_are_contiguous(
        claimant_salary in 0i64..100_000,
        respondent_salary in 0i64..100_000,
    ) {
        let claimant = GenderTerms::resolve(Role::Claimant, None, "דנה", Sex::Female);
        let respondent = GenderTerms::resolve(Role::Respondent, Some(Sex::Male), "יוסי", Sex::Female);
        let disparity = IncomeDisparity::evaluate(claimant_salary, respondent_salary, 2.0);
        let numbered = sequence(property_remedies(&claimant, &respondent, disparity.as_ref()));

        prop_assert_eq!(numbered.len(), if disparity.is_some() { 9 } else { 8 });
        for (i, remedy) in numbered.iter().enumerate() {
            prop_assert_eq!(remedy.number, i + 1);
        }
        prop_assert_eq!(numbered[0].remedy.kind, RemedyKind::BalanceResources);
        prop_assert_eq!(
            numbered[1].remedy.kind == RemedyKind::UnequalDivision,
            disparity.is_some()
        );
    }

    #[test]
    fn disparity_matches_ratio_rule(a in 1i64..100_000, b in 1i64..100_000) {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let expected = high as f64 / low as f64 >= 2.0;
        prop_assert_eq!(IncomeDisparity::evaluate(a, b, 2.0).is_some(), expected);
    }
}

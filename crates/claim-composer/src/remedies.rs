//! Requested remedies
//!
//! Remedies are built as an ordered list of descriptors and numbered only
//! when rendered, so inserting a remedy never requires offset arithmetic.

use shared_types::Node;

use crate::format;
use crate::gender::{GenderTerms, Role};

/// Identity of a remedy, independent of its printed number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemedyKind {
    BalanceResources,
    UnequalDivision,
    ExpertAppraisal,
    ReturnWithdrawnFunds,
    BenefitDisclosure,
    DocumentDiscovery,
    SplitCausesOfAction,
    InterimRelief,
    CostsAndFees,
    /// Claim-specific remedy of the non-property composers
    Claim,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Remedy {
    pub kind: RemedyKind,
    pub text: String,
}

impl Remedy {
    pub fn new(kind: RemedyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn claim(text: impl Into<String>) -> Self {
        Self::new(RemedyKind::Claim, text)
    }
}

/// A remedy with its printed number
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedRemedy {
    pub number: usize,
    pub remedy: Remedy,
}

/// Income gap large enough to justify an unequal division
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeDisparity {
    pub higher: Role,
    pub lower: Role,
    /// Higher salary divided by the lower one
    pub ratio: f64,
}

impl IncomeDisparity {
    /// Compare the two gross monthly salaries
    ///
    /// Both must be present and non-zero; a ratio equal to the threshold
    /// counts as a disparity.
    pub fn evaluate(claimant_salary: i64, respondent_salary: i64, threshold: f64) -> Option<Self> {
        if claimant_salary <= 0 || respondent_salary <= 0 {
            return None;
        }
        let (higher, lower, high, low) = if claimant_salary >= respondent_salary {
            (Role::Claimant, Role::Respondent, claimant_salary, respondent_salary)
        } else {
            (Role::Respondent, Role::Claimant, respondent_salary, claimant_salary)
        };
        let ratio = high as f64 / low as f64;
        if ratio >= threshold {
            Some(Self {
                higher,
                lower,
                ratio,
            })
        } else {
            None
        }
    }
}

/// Base remedies of a property claim, with the disparity clause inserted
/// right after the first remedy when applicable
pub fn property_remedies(
    claimant: &GenderTerms,
    respondent: &GenderTerms,
    disparity: Option<&IncomeDisparity>,
) -> Vec<Remedy> {
    let mut remedies = vec![
        Remedy::new(
            RemedyKind::BalanceResources,
            "להורות על איזון המשאבים בין הצדדים ועל חלוקת הרכוש המשותף ביניהם.",
        ),
        Remedy::new(
            RemedyKind::ExpertAppraisal,
            "למנות מומחה מטעם בית המשפט להערכת שווי הנכסים והזכויות, ככל שיידרש.",
        ),
        Remedy::new(
            RemedyKind::ReturnWithdrawnFunds,
            format!(
                "להורות ל{} להשיב כספים שנמשכו שלא כדין מחשבונות משותפים, בצירוף הפרשי הצמדה וריבית.",
                respondent.title
            ),
        ),
        Remedy::new(
            RemedyKind::BenefitDisclosure,
            "להורות לצדדים לגלות את מלוא זכויותיהם הסוציאליות, לרבות קרנות פנסיה, קופות גמל, קרנות השתלמות ופיצויי פיטורין.",
        ),
        Remedy::new(
            RemedyKind::DocumentDiscovery,
            "להורות על גילוי ועיון במסמכים הנוגעים לרכוש הצדדים, לחשבונותיהם ולהכנסותיהם.",
        ),
        Remedy::new(
            RemedyKind::SplitCausesOfAction,
            format!(
                "להתיר ל{} לפצל את {} ביחס לעילות שטרם התגבשו או שטרם נודעו {}.",
                claimant.title,
                claimant.pick("סעדיו", "סעדיה"),
                claimant.pick("לו", "לה")
            ),
        ),
        Remedy::new(
            RemedyKind::InterimRelief,
            "ליתן סעדים זמניים לשמירת הרכוש המשותף עד למתן הכרעה בתביעה.",
        ),
        Remedy::new(
            RemedyKind::CostsAndFees,
            format!(
                "לחייב את {} בהוצאות המשפט ובשכר טרחת עורך דין בצירוף מע\"מ כדין.",
                respondent.title
            ),
        ),
    ];

    if let Some(disparity) = disparity {
        let (lower, higher) = match disparity.lower {
            Role::Claimant => (claimant, respondent),
            Role::Respondent => (respondent, claimant),
        };
        remedies.insert(
            1,
            Remedy::new(
                RemedyKind::UnequalDivision,
                format!(
                    "להורות על חלוקה בלתי שווה של המשאבים לטובת {}, {}, שכן הכנסת {} גבוהה פי {:.1} מהכנסת {}.",
                    lower.title, lower.name, higher.title, disparity.ratio, lower.title
                ),
            ),
        );
    }

    remedies
}

/// Attach sequential printed numbers starting at 1
pub fn sequence(remedies: Vec<Remedy>) -> Vec<NumberedRemedy> {
    remedies
        .into_iter()
        .enumerate()
        .map(|(i, remedy)| NumberedRemedy {
            number: i + 1,
            remedy,
        })
        .collect()
}

/// Numbered paragraphs for the remedies section
pub fn render(remedies: &[NumberedRemedy]) -> Vec<Node> {
    remedies
        .iter()
        .map(|numbered| format::numbered(numbered.number, numbered.remedy.text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::Sex;

    fn terms() -> (GenderTerms, GenderTerms) {
        (
            GenderTerms::resolve(Role::Claimant, Some(Sex::Female), "דנה", Sex::Female),
            GenderTerms::resolve(Role::Respondent, Some(Sex::Male), "יוסי", Sex::Female),
        )
    }

    #[test]
    fn test_no_disparity_below_threshold() {
        assert_eq!(IncomeDisparity::evaluate(10_000, 15_000, 2.0), None);
    }

    #[test]
    fn test_disparity_at_exact_threshold() {
        let disparity = IncomeDisparity::evaluate(20_000, 10_000, 2.0).unwrap();
        assert_eq!(disparity.higher, Role::Claimant);
        assert_eq!(disparity.lower, Role::Respondent);
        assert_eq!(disparity.ratio, 2.0);
    }

    #[test]
    fn test_missing_or_zero_salary_is_no_disparity() {
        assert_eq!(IncomeDisparity::evaluate(0, 25_000, 2.0), None);
        assert_eq!(IncomeDisparity::evaluate(25_000, 0, 2.0), None);
    }

    #[test]
    fn test_base_numbering_without_disparity() {
        let (claimant, respondent) = terms();
        let numbered = sequence(property_remedies(&claimant, &respondent, None));
        let numbers: Vec<usize> = numbered.iter().map(|n| n.number).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
        assert_eq!(numbered[0].remedy.kind, RemedyKind::BalanceResources);
        assert_eq!(numbered[7].remedy.kind, RemedyKind::CostsAndFees);
    }

    #[test]
    fn test_disparity_inserted_second_and_renumbered() {
        let (claimant, respondent) = terms();
        let base = property_remedies(&claimant, &respondent, None);
        let disparity = IncomeDisparity::evaluate(10_000, 25_000, 2.0).unwrap();
        let numbered = sequence(property_remedies(&claimant, &respondent, Some(&disparity)));

        assert_eq!(numbered.len(), 9);
        assert_eq!(numbered[1].number, 2);
        assert_eq!(numbered[1].remedy.kind, RemedyKind::UnequalDivision);
        assert!(numbered[1].remedy.text.contains("התובעת, דנה"));
        assert!(numbered[1].remedy.text.contains("2.5"));

        for (i, original) in base.iter().enumerate().skip(1) {
            assert_eq!(numbered[i + 1].number, i + 2);
            assert_eq!(&numbered[i + 1].remedy, original);
        }
    }

    #[test]
    fn test_render_prints_numbers() {
        let nodes = render(&sequence(vec![Remedy::claim("א"), Remedy::claim("ב")]));
        assert_eq!(nodes[1].text(), "2. ב");
    }
}

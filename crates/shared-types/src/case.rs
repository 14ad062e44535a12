//! Client intake record consumed by the composition engine
//!
//! The surrounding wizard produces this record as camelCase JSON. Every field
//! that the client may skip is optional; the engine renders a placeholder
//! instead of failing.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

/// Recorded sex of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(format!("Unknown sex: {}", other)),
        }
    }
}

/// Deserialize a sex field leniently: unknown strings become `None`
fn lenient_sex<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Employment status as captured by the intake wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmploymentStatus {
    Employee,
    SelfEmployed,
    Unemployed,
}

/// Employment details of one party
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employment {
    pub status: Option<EmploymentStatus>,
    pub employer: Option<String>,
    /// Gross monthly salary as typed by the client
    pub gross_salary: Option<AmountText>,
}

/// One of the two parties to the case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub full_name: Option<String>,
    pub id_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_sex")]
    pub sex: Option<Sex>,
    pub marriage_date: Option<String>,
    #[serde(default)]
    pub employment: Employment,
}

impl Party {
    /// Display name, if the client provided a non-blank one
    pub fn name(&self) -> Option<&str> {
        non_blank(self.full_name.as_deref())
    }
}

/// A child of the parties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    /// Name of the parent who is not filing the claim
    pub other_parent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_sex")]
    pub sex: Option<Sex>,
}

impl Child {
    /// First and last name joined, skipping missing parts
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// The closed set of claim types a case may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimType {
    Property,
    Custody,
    Alimony,
    Divorce,
    DivorceAgreement,
}

impl ClaimType {
    /// All claim types in canonical order
    pub const ALL: [ClaimType; 5] = [
        ClaimType::Property,
        ClaimType::Custody,
        ClaimType::Alimony,
        ClaimType::Divorce,
        ClaimType::DivorceAgreement,
    ];

    /// Key used in JSON and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ClaimType::Property => "property",
            ClaimType::Custody => "custody",
            ClaimType::Alimony => "alimony",
            ClaimType::Divorce => "divorce",
            ClaimType::DivorceAgreement => "divorceAgreement",
        }
    }

    /// Hebrew label used inside legal prose
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Property => "תביעה רכושית",
            ClaimType::Custody => "תביעת משמורת והסדרי שהות",
            ClaimType::Alimony => "תביעת מזונות",
            ClaimType::Divorce => "תביעת גירושין",
            ClaimType::DivorceAgreement => "בקשה לאישור הסכם גירושין",
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|claim| claim.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown claim type: {}", s))
    }
}

/// Marital status of the parties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaritalStatus {
    Married,
    Cohabiting,
    Separated,
    Divorced,
}

/// Relationship history shared by every claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub marital_status: Option<MaritalStatus>,
    pub relationship_start_date: Option<String>,
    pub wedding_date: Option<String>,
    pub separation_date: Option<String>,
    /// Whether the parties were legally married (civil or religious ceremony)
    pub legally_married: Option<bool>,
}

impl Relationship {
    /// Legally married parties fall under the matrimonial-property statute
    pub fn is_legally_married(&self) -> bool {
        match self.legally_married {
            Some(married) => married,
            None => {
                matches!(
                    self.marital_status,
                    Some(MaritalStatus::Married)
                        | Some(MaritalStatus::Separated)
                        | Some(MaritalStatus::Divorced)
                ) || non_blank(self.wedding_date.as_deref()).is_some()
            }
        }
    }
}

/// Housing arrangement of the family
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Housing {
    /// Who currently lives in the family residence
    pub current_occupant: Option<String>,
    /// "owned" or "rented"
    pub tenure: Option<String>,
    pub address: Option<String>,
}

/// Domestic-violence history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticViolence {
    pub occurred: Option<bool>,
    pub police_complaint: Option<bool>,
    pub protection_order: Option<bool>,
    pub details: Option<String>,
}

/// A concurrent family-court proceeding
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherCase {
    pub court: Option<String>,
    pub case_number: Option<String>,
    pub subject: Option<String>,
}

/// Prior contact with welfare or mediation services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelfareContact {
    pub contacted: Option<bool>,
    pub unit: Option<String>,
    pub details: Option<String>,
}

/// Answers to questions asked once per case regardless of claim type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    #[serde(default)]
    pub housing: Housing,
    #[serde(default)]
    pub domestic_violence: DomesticViolence,
    #[serde(default)]
    pub other_cases: Vec<OtherCase>,
    #[serde(default)]
    pub welfare_contact: WelfareContact,
}

/// Free-text or numeric amount as typed by the client
///
/// The original text is kept for display; [`AmountText::coerce`] gives the
/// integer used for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AmountText(pub String);

impl AmountText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the amount; unparseable text yields 0
    ///
    /// Thousands separators, currency signs and whitespace are ignored and a
    /// fractional part is truncated.
    pub fn coerce(&self) -> i64 {
        let cleaned: String = self
            .0
            .chars()
            .filter(|c| !matches!(c, ',' | '₪' | ' ' | '\u{a0}' | '\''))
            .collect();
        let integer_part = cleaned.split('.').next().unwrap_or_default();
        integer_part.parse::<i64>().unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for AmountText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => AmountText(text),
            Raw::Number(number) => AmountText(number.to_string()),
        })
    }
}

/// A single inventory entry: apartment, vehicle, saving, benefit, asset or debt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyItem {
    pub description: Option<String>,
    /// Value for assets, amount for debts
    #[serde(alias = "amount")]
    pub value: Option<AmountText>,
    /// Declared owner ("both", "claimant", "respondent" or free text); debtor for debts
    #[serde(alias = "debtor")]
    pub owner: Option<String>,
    pub purchase_date: Option<String>,
}

impl PropertyItem {
    pub fn coerced_value(&self) -> i64 {
        self.value.as_ref().map(AmountText::coerce).unwrap_or(0)
    }
}

/// Answers of the property claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnswers {
    #[serde(default)]
    pub apartments: Vec<PropertyItem>,
    #[serde(default)]
    pub vehicles: Vec<PropertyItem>,
    #[serde(default)]
    pub savings: Vec<PropertyItem>,
    #[serde(default)]
    pub benefits: Vec<PropertyItem>,
    #[serde(default)]
    pub properties: Vec<PropertyItem>,
    #[serde(default)]
    pub debts: Vec<PropertyItem>,
    /// Narrative of funds withdrawn without consent
    pub withdrawn_funds: Option<String>,
}

/// Answers of the divorce claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivorceAnswers {
    /// Who wants the divorce and why
    pub who_wants_divorce: Option<String>,
    pub grounds: Option<String>,
    pub reconciliation_attempts: Option<bool>,
    pub reconciliation_details: Option<String>,
}

/// Answers of the custody claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyAnswers {
    /// "sole" or "joint"
    pub requested_arrangement: Option<String>,
    pub children_live_with: Option<String>,
    pub proposed_visitation: Option<String>,
    pub reasons: Option<String>,
}

/// Answers of the alimony (child support) claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlimonyAnswers {
    pub monthly_needs_per_child: Option<AmountText>,
    pub requested_amount_per_child: Option<AmountText>,
    pub housing_share: Option<AmountText>,
    pub special_expenses: Option<String>,
    pub reasons: Option<String>,
}

/// Agreed terms of a divorce agreement submitted for approval
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivorceAgreementAnswers {
    pub custody_terms: Option<String>,
    pub visitation_terms: Option<String>,
    pub alimony_per_child: Option<AmountText>,
    pub property_terms: Option<String>,
    pub additional_terms: Option<String>,
}

/// Image supplied either as raw bytes or as base64 text (optionally a data URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    Bytes(Vec<u8>),
    Base64(String),
}

impl ImageData {
    /// Decode to raw bytes; `None` when the payload is empty or not valid base64
    pub fn decode(&self) -> Option<Vec<u8>> {
        match self {
            ImageData::Bytes(bytes) if bytes.is_empty() => None,
            ImageData::Bytes(bytes) => Some(bytes.clone()),
            ImageData::Base64(text) => {
                let payload = match text.split_once(";base64,") {
                    Some((_, data)) => data,
                    None => text.as_str(),
                };
                let payload = payload.trim();
                if payload.is_empty() {
                    return None;
                }
                base64::engine::general_purpose::STANDARD
                    .decode(payload)
                    .ok()
                    .filter(|bytes| !bytes.is_empty())
            }
        }
    }
}

/// Representing lawyer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub full_name: Option<String>,
    pub license_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Signatures collected at the end of the wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signatures {
    pub client: Option<ImageData>,
    pub lawyer: Option<ImageData>,
    /// Official stamp accompanying the lawyer's signature
    pub lawyer_stamp: Option<ImageData>,
}

/// An exhibit appended to the claim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Exhibit letter or label
    pub label: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageData>,
}

/// The full intake record for one case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: Option<String>,
    pub submitted_at: Option<String>,
    pub court_city: Option<String>,
    #[serde(default)]
    pub claimant: Party,
    #[serde(default)]
    pub respondent: Party,
    #[serde(default)]
    pub claim_types: Vec<ClaimType>,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub relationship: Relationship,
    #[serde(default)]
    pub questionnaire: Questionnaire,
    pub property: Option<PropertyAnswers>,
    pub custody: Option<CustodyAnswers>,
    pub alimony: Option<AlimonyAnswers>,
    pub divorce: Option<DivorceAnswers>,
    pub divorce_agreement: Option<DivorceAgreementAnswers>,
    pub lawyer: Option<Lawyer>,
    #[serde(default)]
    pub signatures: Signatures,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl CaseRecord {
    /// Parse a case record from the wizard's JSON payload
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn selects(&self, claim: ClaimType) -> bool {
        self.claim_types.contains(&claim)
    }
}

/// Treat empty and whitespace-only strings as absent
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_amount_from_number_and_string() {
        let item: PropertyItem =
            serde_json::from_value(serde_json::json!({"value": 3200000, "owner": "both"})).unwrap();
        assert_eq!(item.coerced_value(), 3_200_000);

        let item: PropertyItem =
            serde_json::from_value(serde_json::json!({"value": "2,800,000 ₪"})).unwrap();
        assert_eq!(item.coerced_value(), 2_800_000);
        assert_eq!(item.value.unwrap().as_str(), "2,800,000 ₪");
    }

    #[test]
    fn test_unparseable_amount_is_zero() {
        assert_eq!(AmountText::new("about half a million").coerce(), 0);
        assert_eq!(AmountText::new("").coerce(), 0);
        assert_eq!(AmountText::new("1500.75").coerce(), 1500);
    }

    #[test]
    fn test_debt_uses_amount_and_debtor_aliases() {
        let item: PropertyItem = serde_json::from_value(
            serde_json::json!({"description": "משכנתא", "amount": "450000", "debtor": "both"}),
        )
        .unwrap();
        assert_eq!(item.owner.as_deref(), Some("both"));
        assert_eq!(item.coerced_value(), 450_000);
    }

    #[test]
    fn test_unknown_sex_is_absent() {
        let party: Party =
            serde_json::from_value(serde_json::json!({"fullName": "Dana", "sex": "other"}))
                .unwrap();
        assert_eq!(party.sex, None);

        let party: Party =
            serde_json::from_value(serde_json::json!({"fullName": "Avi", "sex": "male"})).unwrap();
        assert_eq!(party.sex, Some(Sex::Male));
    }

    #[test]
    fn test_claim_type_round_trip_keys() {
        let case: CaseRecord = serde_json::from_value(
            serde_json::json!({"claimTypes": ["property", "divorceAgreement"]}),
        )
        .unwrap();
        assert_eq!(
            case.claim_types,
            vec![ClaimType::Property, ClaimType::DivorceAgreement]
        );
        assert_eq!("divorceagreement".parse::<ClaimType>(), Ok(ClaimType::DivorceAgreement));
    }

    #[test]
    fn test_image_decodes_data_url() {
        let image = ImageData::Base64("data:image/png;base64,iVBORw0KGgo=".to_string());
        let bytes = image.decode().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_image_invalid_base64_is_none() {
        assert!(ImageData::Base64("not base64!!".to_string()).decode().is_none());
        assert!(ImageData::Base64(String::new()).decode().is_none());
        assert!(ImageData::Bytes(vec![]).decode().is_none());
    }

    #[test]
    fn test_legally_married_inference() {
        let relationship = Relationship {
            marital_status: Some(MaritalStatus::Cohabiting),
            ..Default::default()
        };
        assert!(!relationship.is_legally_married());

        let relationship = Relationship {
            wedding_date: Some("2010-06-01".to_string()),
            ..Default::default()
        };
        assert!(relationship.is_legally_married());

        let relationship = Relationship {
            marital_status: Some(MaritalStatus::Married),
            legally_married: Some(false),
            ..Default::default()
        };
        assert!(!relationship.is_legally_married());
    }

    #[test]
    fn test_child_full_name() {
        let child = Child {
            first_name: Some("נועה".to_string()),
            last_name: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(child.full_name().as_deref(), Some("נועה"));
        assert_eq!(Child::default().full_name(), None);
    }
}

//! Per-request composition context
//!
//! Holds the read-only case record together with everything pre-computed
//! before composition starts: gendered terms for both parties and the
//! rewritten narrative texts.

use chrono::NaiveDate;
use shared_types::{non_blank, CaseRecord, ClaimType, Party, StyleConfig};

use crate::config::EngineConfig;
use crate::error::ComposeError;
use crate::format::{BLANK_FIELD, NOT_SPECIFIED};
use crate::gender::{GenderTerms, Role};
use crate::property::JOINT_OWNER;
use crate::transformer::Narratives;

pub struct ComposeContext<'a> {
    pub case: &'a CaseRecord,
    pub config: &'a EngineConfig,
    pub claim: ClaimType,
    pub claimant: GenderTerms,
    pub respondent: GenderTerms,
    pub narratives: Narratives,
    /// Date printed on declarations and used when no separation date is given
    pub today: NaiveDate,
}

impl<'a> ComposeContext<'a> {
    /// Build the context for one claim
    ///
    /// Fails only when neither party has a name, since the court header
    /// cannot be built without at least one.
    pub fn new(
        case: &'a CaseRecord,
        config: &'a EngineConfig,
        claim: ClaimType,
        today: NaiveDate,
    ) -> Result<Self, ComposeError> {
        if case.claimant.name().is_none() && case.respondent.name().is_none() {
            return Err(ComposeError::MissingParties);
        }

        let default_sex = config.rules.default_sex;
        Ok(Self {
            case,
            config,
            claim,
            claimant: GenderTerms::for_party(Role::Claimant, &case.claimant, default_sex),
            respondent: GenderTerms::for_party(Role::Respondent, &case.respondent, default_sex),
            narratives: Narratives::default(),
            today,
        })
    }

    pub fn with_narratives(mut self, narratives: Narratives) -> Self {
        self.narratives = narratives;
        self
    }

    pub fn style(&self) -> &StyleConfig {
        &self.config.style
    }

    pub fn court_city(&self) -> &str {
        non_blank(self.case.court_city.as_deref())
            .or_else(|| non_blank(self.config.default_court_city.as_deref()))
            .unwrap_or(BLANK_FIELD)
    }

    pub fn terms(&self, role: Role) -> &GenderTerms {
        match role {
            Role::Claimant => &self.claimant,
            Role::Respondent => &self.respondent,
        }
    }

    pub fn party(&self, role: Role) -> &Party {
        match role {
            Role::Claimant => &self.case.claimant,
            Role::Respondent => &self.case.respondent,
        }
    }

    /// Rewritten narrative for `key`, or the original text when the field
    /// was not routed through the transformer
    pub fn narrative(&self, key: &str, original: Option<&str>) -> Option<String> {
        self.narratives
            .get(key)
            .and_then(|text| non_blank(Some(text)))
            .or_else(|| non_blank(original))
            .map(str::to_string)
    }

    /// Human label for a declared owner or debtor token
    pub fn owner_label(&self, owner: Option<&str>) -> String {
        match owner {
            None => NOT_SPECIFIED.to_string(),
            Some(JOINT_OWNER) => "שני הצדדים".to_string(),
            Some("claimant") => self.claimant.titled_name(),
            Some("respondent") => self.respondent.titled_name(),
            Some(other) if other.trim().is_empty() => NOT_SPECIFIED.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

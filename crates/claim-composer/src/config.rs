//! Engine configuration
//!
//! Everything that is a business constant rather than logic lives here: the
//! income-disparity threshold, the default grammatical gender, court fees and
//! page-estimate constants. The configuration is loaded from TOML and every
//! field has a default, so an empty file is a valid configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared_types::{ClaimType, Sex, StyleConfig};
use std::fs;
use std::path::Path;

use crate::error::ComposeError;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fonts and sizes threaded through every builder
    pub style: StyleConfig,
    pub rules: RulesConfig,
    pub court_fees: CourtFees,
    pub pages: PageEstimate,
    /// Call-site timeout for each legal-language transformer request
    pub transform_timeout_ms: u64,
    /// Court city used when the case record omits one
    pub default_court_city: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            rules: RulesConfig::default(),
            court_fees: CourtFees::default(),
            pages: PageEstimate::default(),
            transform_timeout_ms: default_transform_timeout_ms(),
            default_court_city: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed or
    /// the resulting configuration fails [`EngineConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the rules meaningless
    pub fn validate(&self) -> Result<(), ComposeError> {
        if !(self.rules.disparity_ratio > 0.0) {
            return Err(ComposeError::Config(format!(
                "disparity_ratio must be positive, got {}",
                self.rules.disparity_ratio
            )));
        }
        if self.pages.items_per_page == 0 {
            return Err(ComposeError::Config(
                "pages.items_per_page must be at least 1".to_string(),
            ));
        }
        if self.pages.children_per_page == 0 {
            return Err(ComposeError::Config(
                "pages.children_per_page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_transform_timeout_ms() -> u64 {
    20_000
}

/// Fixed business rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Larger salary must be at least this multiple of the smaller one
    pub disparity_ratio: f64,
    /// Grammatical gender used when a party's sex is absent
    pub default_sex: Sex,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            disparity_ratio: 2.0,
            default_sex: Sex::Female,
        }
    }
}

/// Statutory court fees in shekels; 0 means the claim is exempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtFees {
    pub property: u32,
    pub custody: u32,
    pub alimony: u32,
    pub divorce: u32,
    pub divorce_agreement: u32,
    /// Regulation cited next to the amount
    pub citation: String,
}

impl Default for CourtFees {
    fn default() -> Self {
        Self {
            property: 1_121,
            custody: 570,
            alimony: 0,
            divorce: 570,
            divorce_agreement: 570,
            citation: "תקנות בתי המשפט (אגרות), התשס\"ז-2007".to_string(),
        }
    }
}

impl CourtFees {
    pub fn for_claim(&self, claim: ClaimType) -> u32 {
        match claim {
            ClaimType::Property => self.property,
            ClaimType::Custody => self.custody,
            ClaimType::Alimony => self.alimony,
            ClaimType::Divorce => self.divorce,
            ClaimType::DivorceAgreement => self.divorce_agreement,
        }
    }
}

/// Constants of the page-count heuristic used for exhibit cross-references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEstimate {
    pub property_base: u32,
    pub custody_base: u32,
    pub alimony_base: u32,
    pub divorce_base: u32,
    pub divorce_agreement_base: u32,
    /// Itemized property entries that fit on one page
    pub items_per_page: u32,
    /// Children rows that fit on one page
    pub children_per_page: u32,
    pub statement_pages: u32,
    pub power_of_attorney_pages: u32,
    pub affidavit_pages: u32,
}

impl Default for PageEstimate {
    fn default() -> Self {
        Self {
            property_base: 5,
            custody_base: 4,
            alimony_base: 4,
            divorce_base: 4,
            divorce_agreement_base: 3,
            items_per_page: 8,
            children_per_page: 3,
            statement_pages: 3,
            power_of_attorney_pages: 1,
            affidavit_pages: 1,
        }
    }
}

impl PageEstimate {
    pub fn base_for(&self, claim: ClaimType) -> u32 {
        match claim {
            ClaimType::Property => self.property_base,
            ClaimType::Custody => self.custody_base,
            ClaimType::Alimony => self.alimony_base,
            ClaimType::Divorce => self.divorce_base,
            ClaimType::DivorceAgreement => self.divorce_agreement_base,
        }
    }
}

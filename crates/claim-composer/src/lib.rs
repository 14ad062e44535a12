//! Family-court claim composition engine
//!
//! Turns a client intake record into a linear [`Document`] per selected claim
//! type: the claim itself, the statement of details, a power of attorney, an
//! affidavit and an optional attachments appendix. Rendering the document
//! into bytes is left to a [`shared_types::DocumentSerializer`].
//!
//! ```ignore
//! let engine = ClaimEngine::new(EngineConfig::default())?
//!     .with_transformer(Arc::new(MyTransformer::new()));
//! let document = engine.compose_claim(&case, ClaimType::Property).await?;
//! ```

pub mod backup;
pub mod claims;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod gender;
pub mod property;
pub mod remedies;
pub mod sections;
pub mod transformer;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use shared_types::{CaseRecord, ClaimType, Document};
use tracing::{debug, info};

pub use claims::{compose_document, composer_for, DocumentComposer};
pub use config::EngineConfig;
pub use context::ComposeContext;
pub use error::ComposeError;
pub use gender::{GenderTerms, Role};
pub use transformer::{
    LegalLanguageTransformer, NarrativeField, PassthroughTransformer, TransformError,
    TransformRequest,
};

use transformer::{rewrite_all, RewriteScope};

/// Engine entry point
///
/// Holds no per-request state; one engine can serve concurrent requests.
pub struct ClaimEngine {
    config: EngineConfig,
    transformer: Arc<dyn LegalLanguageTransformer>,
    /// Fixed composition date, mainly for reproducible output
    today: Option<NaiveDate>,
}

impl ClaimEngine {
    /// Create an engine that leaves narrative texts unchanged
    pub fn new(config: EngineConfig) -> Result<Self, ComposeError> {
        config.validate()?;
        Ok(Self {
            config,
            transformer: Arc::new(PassthroughTransformer),
            today: None,
        })
    }

    pub fn with_transformer(mut self, transformer: Arc<dyn LegalLanguageTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Compose the document set of one claim type
    ///
    /// Narrative fields are rewritten first; a failing transformer only means
    /// the original text is kept.
    pub async fn compose_claim(
        &self,
        case: &CaseRecord,
        claim: ClaimType,
    ) -> Result<Document, ComposeError> {
        let ctx = ComposeContext::new(case, &self.config, claim, self.today())?;
        let composer = composer_for(claim);

        let fields = composer.narrative_fields(case);
        debug!(claim = %claim, fields = fields.len(), "Rewriting narrative fields");
        let narratives = {
            let scope = RewriteScope {
                claim_label: claim.label(),
                claimant_name: case.claimant.name(),
                respondent_name: case.respondent.name(),
                timeout: Duration::from_millis(self.config.transform_timeout_ms),
            };
            rewrite_all(self.transformer.as_ref(), &scope, &fields).await
        };

        let ctx = ctx.with_narratives(narratives);
        Ok(compose_document(composer, &ctx))
    }

    /// Compose every selected claim in selection order
    ///
    /// A claim type selected twice is composed once.
    pub async fn compose_case(
        &self,
        case: &CaseRecord,
    ) -> Result<Vec<(ClaimType, Document)>, ComposeError> {
        let claims = distinct_claims(&case.claim_types);
        let mut documents = Vec::with_capacity(claims.len());
        for claim in claims {
            documents.push((claim, self.compose_claim(case, claim).await?));
        }
        info!(
            case_id = case.id.as_deref().unwrap_or("-"),
            documents = documents.len(),
            "Case composed"
        );
        Ok(documents)
    }

    /// Internal Q&A review document of the whole record
    pub fn compose_backup(&self, case: &CaseRecord) -> Result<Document, ComposeError> {
        backup::compose_backup(case, &self.config.style)
    }
}

/// Selected claim types without repeats, in first-selection order
pub(crate) fn distinct_claims(claims: &[ClaimType]) -> Vec<ClaimType> {
    let mut distinct = Vec::with_capacity(claims.len());
    for claim in claims {
        if !distinct.contains(claim) {
            distinct.push(*claim);
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Party;

    fn case(claims: Vec<ClaimType>) -> CaseRecord {
        CaseRecord {
            claimant: Party {
                full_name: Some("דנה כהן".to_string()),
                ..Default::default()
            },
            respondent: Party {
                full_name: Some("יוסי כהן".to_string()),
                ..Default::default()
            },
            claim_types: claims,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.rules.disparity_ratio = 0.0;
        assert!(matches!(
            ClaimEngine::new(config),
            Err(ComposeError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_compose_case_keeps_selection_order() {
        let engine = ClaimEngine::new(EngineConfig::default())
            .unwrap()
            .with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let case = case(vec![
            ClaimType::Divorce,
            ClaimType::Property,
            ClaimType::Divorce,
        ]);
        let documents = engine.compose_case(&case).await.unwrap();
        let claims: Vec<ClaimType> = documents.iter().map(|(claim, _)| *claim).collect();
        assert_eq!(claims, vec![ClaimType::Divorce, ClaimType::Property]);
        assert!(documents[0].1.title.starts_with("תביעת גירושין"));
    }

    #[tokio::test]
    async fn test_missing_parties_is_the_only_failure() {
        let engine = ClaimEngine::new(EngineConfig::default()).unwrap();
        let result = engine
            .compose_claim(&CaseRecord::default(), ClaimType::Custody)
            .await;
        assert!(matches!(result, Err(ComposeError::MissingParties)));
    }
}

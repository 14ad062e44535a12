//! Legal Language Transformer port
//!
//! The transformer is an external service that rewrites a client's free-text
//! narrative into formal legal phrasing. It may time out or fail; the engine
//! never lets that abort composition and falls back to the original text.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct UppercaseTransformer;
//!
//! #[async_trait]
//! impl LegalLanguageTransformer for UppercaseTransformer {
//!     async fn transform(&self, request: TransformRequest) -> Result<String, TransformError> {
//!         Ok(request.text.to_uppercase())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure modes of the transformer service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Transformer timed out after {0}ms")]
    Timeout(u64),

    #[error("Transformer unavailable: {0}")]
    Unavailable(String),

    #[error("Transformer quota exceeded")]
    QuotaExceeded,

    #[error("Transformer rejected input: {0}")]
    InvalidInput(String),
}

/// One rewrite request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub text: String,
    /// Claim-type label, e.g. "תביעת גירושין"
    pub claim_label: String,
    /// `None` when the intake record has no name for the party
    pub claimant_name: Option<String>,
    pub respondent_name: Option<String>,
    /// Label of the field the text was entered in
    pub field_label: String,
}

/// Port for the external legal-language rewriting service
#[async_trait]
pub trait LegalLanguageTransformer: Send + Sync {
    /// Rewrite the request text in formal legal phrasing
    async fn transform(&self, request: TransformRequest) -> Result<String, TransformError>;
}

/// Transformer that returns the text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTransformer;

#[async_trait]
impl LegalLanguageTransformer for PassthroughTransformer {
    async fn transform(&self, request: TransformRequest) -> Result<String, TransformError> {
        Ok(request.text)
    }
}

/// A free-text field eligible for rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeField {
    /// Stable key used by the composer to look the result up
    pub key: &'static str,
    pub label: &'static str,
    pub text: String,
}

impl NarrativeField {
    pub fn new(key: &'static str, label: &'static str, text: impl Into<String>) -> Self {
        Self {
            key,
            label,
            text: text.into(),
        }
    }
}

/// Rewritten narrative texts keyed by field key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narratives {
    texts: HashMap<&'static str, String>,
}

impl Narratives {
    pub fn insert(&mut self, key: &'static str, text: String) {
        self.texts.insert(key, text);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Request context shared by every field of one claim
#[derive(Debug, Clone)]
pub struct RewriteScope<'a> {
    pub claim_label: &'a str,
    pub claimant_name: Option<&'a str>,
    pub respondent_name: Option<&'a str>,
    pub timeout: Duration,
}

/// Rewrite one field, falling back to the original text on any failure
pub async fn rewrite_or_original(
    transformer: &dyn LegalLanguageTransformer,
    scope: &RewriteScope<'_>,
    field: &NarrativeField,
) -> String {
    if field.text.trim().is_empty() {
        return field.text.clone();
    }

    let request = TransformRequest {
        text: field.text.clone(),
        claim_label: scope.claim_label.to_string(),
        claimant_name: scope.claimant_name.map(str::to_string),
        respondent_name: scope.respondent_name.map(str::to_string),
        field_label: field.label.to_string(),
    };

    let timeout_ms = scope.timeout.as_millis() as u64;
    let outcome = match tokio::time::timeout(scope.timeout, transformer.transform(request)).await
    {
        Ok(result) => result,
        Err(_elapsed) => Err(TransformError::Timeout(timeout_ms)),
    };

    match outcome {
        Ok(rewritten) if !rewritten.trim().is_empty() => {
            debug!(field = field.label, "Narrative rewritten");
            rewritten
        }
        Ok(_) => {
            warn!(field = field.label, "Transformer returned empty text, keeping original");
            field.text.clone()
        }
        Err(error) => {
            warn!(field = field.label, error = %error, "Transformer failed, keeping original");
            field.text.clone()
        }
    }
}

/// Rewrite every field; results keep field order regardless of completion order
pub async fn rewrite_all(
    transformer: &dyn LegalLanguageTransformer,
    scope: &RewriteScope<'_>,
    fields: &[NarrativeField],
) -> Narratives {
    let rewritten = join_all(
        fields
            .iter()
            .map(|field| rewrite_or_original(transformer, scope, field)),
    )
    .await;

    let mut narratives = Narratives::default();
    for (field, text) in fields.iter().zip(rewritten) {
        narratives.insert(field.key, text);
    }
    narratives
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingTransformer;

    #[async_trait]
    impl LegalLanguageTransformer for FailingTransformer {
        async fn transform(&self, _request: TransformRequest) -> Result<String, TransformError> {
            Err(TransformError::QuotaExceeded)
        }
    }

    struct SlowTransformer;

    #[async_trait]
    impl LegalLanguageTransformer for SlowTransformer {
        async fn transform(&self, request: TransformRequest) -> Result<String, TransformError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(format!("slow: {}", request.text))
        }
    }

    #[derive(Default)]
    struct CountingTransformer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LegalLanguageTransformer for CountingTransformer {
        async fn transform(&self, request: TransformRequest) -> Result<String, TransformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{}] {}", request.field_label, request.text))
        }
    }

    fn scope() -> RewriteScope<'static> {
        RewriteScope {
            claim_label: "תביעת גירושין",
            claimant_name: Some("דנה"),
            respondent_name: Some("יוסי"),
            timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_original() {
        let field = NarrativeField::new("grounds", "עילות", "הוא לא בבית אף פעם");
        let text = rewrite_or_original(&FailingTransformer, &scope(), &field).await;
        assert_eq!(text, "הוא לא בבית אף פעם");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_original() {
        let field = NarrativeField::new("grounds", "עילות", "טקסט מקורי");
        let text = rewrite_or_original(&SlowTransformer, &scope(), &field).await;
        assert_eq!(text, "טקסט מקורי");
    }

    #[tokio::test]
    async fn test_blank_text_skips_the_call() {
        let transformer = CountingTransformer::default();
        let fields = vec![
            NarrativeField::new("a", "א", "  "),
            NarrativeField::new("b", "ב", "תוכן"),
        ];
        let narratives = rewrite_all(&transformer, &scope(), &fields).await;
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(narratives.get("a"), Some("  "));
        assert_eq!(narratives.get("b"), Some("[ב] תוכן"));
    }

    #[tokio::test]
    async fn test_passthrough_returns_text() {
        let field = NarrativeField::new("k", "l", "ללא שינוי");
        let text = rewrite_or_original(&PassthroughTransformer, &scope(), &field).await;
        assert_eq!(text, "ללא שינוי");
    }
}

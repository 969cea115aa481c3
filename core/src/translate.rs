//! Translation dispatcher.
//!
//! Block texts go out in one batch joined by an opaque separator; the
//! backend translates the joined payload and the result is split back
//! into per-block strings. When the backend miscounts or fails, each
//! text is re-requested individually, and individual failures degrade
//! to a visible marker instead of aborting the batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Substituted for blank inputs so the backend never receives an
/// empty payload.
pub const EMPTY_PLACEHOLDER: &str = "[empty]";

/// Shown in place of a translation that could not be produced.
pub const ERROR_MARKER: &str = "⚠ translation unavailable";

/// Separator unlikely to survive translation mangled. Same token on
/// both the join and split sides.
const BATCH_SEPARATOR: &str = "|||+++|||";

/// Errors from a single translation request.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed")]
    Request(#[from] reqwest::Error),

    #[error("translation backend returned an unusable response: {reason}")]
    BadResponse { reason: String },
}

/// A backend that translates one payload string. The dispatcher layers
/// batching and per-item degradation on top of this.
pub trait TranslateBackend {
    fn translate(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// The interface the pipeline consumes: order-preserving, one output
/// per input, never fails as a whole.
pub trait Translator {
    fn translate_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Vec<String>> + Send;
}

/// Batching dispatcher over any [`TranslateBackend`].
#[derive(Debug, Clone)]
pub struct BatchTranslator<B> {
    backend: B,
}

impl<B: TranslateBackend + Sync> BatchTranslator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    async fn translate_one(&self, text: &str) -> String {
        match self.backend.translate(text).await {
            Ok(translated) => translated,
            Err(error) => {
                tracing::warn!(%error, text, "single translation failed");
                ERROR_MARKER.to_string()
            }
        }
    }

    /// Fallback path: one request per text, markers for failures.
    async fn translate_singly(&self, texts: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.translate_one(text).await);
        }
        out
    }
}

impl<B: TranslateBackend + Sync> Translator for BatchTranslator<B> {
    async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
        if texts.is_empty() {
            return Vec::new();
        }

        let clean = sanitize_texts(texts);
        let joined = clean.join(BATCH_SEPARATOR);

        match self.backend.translate(&joined).await {
            Ok(response) => match split_batch(&response, clean.len()) {
                Some(translations) => translations,
                None => {
                    tracing::warn!(
                        expected = clean.len(),
                        "batch translation count mismatch, retrying singly"
                    );
                    self.translate_singly(&clean).await
                }
            },
            Err(error) => {
                tracing::warn!(%error, "batch translation failed, retrying singly");
                self.translate_singly(&clean).await
            }
        }
    }
}

/// Replace blank entries with the placeholder token.
fn sanitize_texts(texts: &[String]) -> Vec<String> {
    texts
        .iter()
        .map(|t| {
            if t.trim().is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else {
                t.clone()
            }
        })
        .collect()
}

/// Split a joined batch response back into items. `None` when the
/// backend did not preserve the separator count.
fn split_batch(response: &str, expected: usize) -> Option<Vec<String>> {
    let parts: Vec<String> = response
        .split(BATCH_SEPARATOR)
        .map(|p| p.trim().to_string())
        .collect();
    (parts.len() == expected).then_some(parts)
}

// ─────────────────────────────────────────────────────────────────────
// HTTP backend
// ─────────────────────────────────────────────────────────────────────

/// Translation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// LibreTranslate-compatible endpoint.
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/translate".to_string(),
            source_lang: "auto".to_string(),
            target_lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Backend POSTing to a LibreTranslate-style HTTP service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl HttpBackend {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl TranslateBackend for HttpBackend {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let params = [
            ("q", text),
            ("source", &self.config.source_lang),
            ("target", &self.config.target_lang),
            ("format", "text"),
        ];
        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: TranslateResponse =
            response
                .json()
                .await
                .map_err(|e| TranslateError::BadResponse {
                    reason: e.to_string(),
                })?;
        Ok(body.translated_text)
    }
}

/// Convenience alias for the production dispatcher.
pub type HttpTranslator = BatchTranslator<HttpBackend>;

impl HttpTranslator {
    pub fn from_config(config: TranslationConfig) -> Self {
        BatchTranslator::new(HttpBackend::new(config))
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};

use std::time::Duration;

pub const DEFAULT_SPELLCHECK_URL: &str =
    "https://speller.yandex.net/services/spellservice.json/checkText";

/// One entry reported by the checker. Only the number of entries matters
/// upstream, so the fields are left untyped.
pub type Diagnostic = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum SpellCheckError {
    #[error("spellchecker.check_spelling: request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("spellchecker.check_spelling: malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait SpellChecker: Send + Sync {
    async fn check_spelling(&self, text: &str) -> Result<Vec<Diagnostic>, SpellCheckError>;
}

/// Client for a Yandex.Speller compatible `checkText` endpoint.
pub struct HttpSpellChecker {
    client: reqwest::Client,
    url: String,
}

impl HttpSpellChecker {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SpellChecker for HttpSpellChecker {
    async fn check_spelling(&self, text: &str) -> Result<Vec<Diagnostic>, SpellCheckError> {
        let body = self
            .client
            .post(&self.url)
            .form(&[("text", text)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        // A `null` body means no diagnostics.
        let diagnostics: Vec<Diagnostic> =
            serde_json::from_slice::<Option<Vec<Diagnostic>>>(&body)?.unwrap_or_default();

        tracing::debug!(
            "Spell checker returned {} diagnostic(s)",
            diagnostics.len()
        );

        Ok(diagnostics)
    }
}

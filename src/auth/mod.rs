pub mod oauth;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, state::AppState};

/// Identity every accepted token currently resolves to.
pub const DEMO_IDENTITY: &str = "user1";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("bearer token is empty")]
    EmptyToken,
}

/// Maps a bearer token to the identity that owns the caller's notes.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<String, AuthError>;
}

/// Accepts any non-empty token and answers with one fixed identity.
///
/// Swap in a verifying implementation (signature and claims checks) through
/// [`AppState`]; the handlers only ever see [`Owner`].
#[derive(Debug, Clone)]
pub struct StaticIdentityValidator {
    identity: String,
}

impl StaticIdentityValidator {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

impl Default for StaticIdentityValidator {
    fn default() -> Self {
        Self::new(DEMO_IDENTITY)
    }
}

impl TokenValidator for StaticIdentityValidator {
    fn validate(&self, token: &str) -> Result<String, AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(self.identity.clone())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            tracing::warn!("request without bearer credentials");
            return Err(AppError::MissingCredentials);
        };

        state.validator.validate(token).map(Self).map_err(|e| {
            tracing::warn!("rejecting bearer token: {e}");
            AppError::InvalidToken(e)
        })
    }
}

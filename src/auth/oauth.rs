//! Password and client-credentials token issuance for the demo accounts.
//!
//! Issued tokens are random strings that are not recorded anywhere; note
//! endpoints accept any bearer token through the configured validator.

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use rand::{Rng, distr::Alphanumeric, rng};

use std::{sync::Arc, time::Duration};

use crate::{
    dto::{TokenErrorResponse, TokenRequest, TokenResponse},
    state::AppState,
};

const TOKEN_LEN: usize = 40;

pub trait CredentialVerifier: Send + Sync {
    fn verify_user(&self, username: &str, password: &str) -> bool;
    fn verify_client(&self, client_id: &str, client_secret: &str) -> bool;
}

/// Hardcoded `user1`/`password1` user and `abcdef`/`12345` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCredentials;

impl CredentialVerifier for DemoCredentials {
    fn verify_user(&self, username: &str, password: &str) -> bool {
        username == "user1" && password == "password1"
    }

    fn verify_client(&self, client_id: &str, client_secret: &str) -> bool {
        client_id == "abcdef" && client_secret == "12345"
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("unsupported_grant_type")]
    UnsupportedGrant,

    #[error("invalid_grant")]
    WrongUser,

    #[error("invalid_client")]
    WrongClient,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UnsupportedGrant => StatusCode::BAD_REQUEST,
            Self::WrongUser | Self::WrongClient => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(TokenErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub struct TokenIssuer {
    verifier: Arc<dyn CredentialVerifier>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, ttl: Duration) -> Self {
        Self { verifier, ttl }
    }

    /// `grant_type=password`; also hands out a refresh token.
    pub fn user_token(&self, request: &TokenRequest) -> Result<TokenResponse, TokenError> {
        if request.grant_type != "password" {
            return Err(TokenError::UnsupportedGrant);
        }

        let username = request.username.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();
        if !self.verifier.verify_user(username, password) {
            return Err(TokenError::WrongUser);
        }

        Ok(self.mint(true))
    }

    /// `grant_type=client_credentials`.
    pub fn client_token(&self, request: &TokenRequest) -> Result<TokenResponse, TokenError> {
        if request.grant_type != "client_credentials" {
            return Err(TokenError::UnsupportedGrant);
        }

        let client_id = request.client_id.as_deref().unwrap_or_default();
        let client_secret = request.client_secret.as_deref().unwrap_or_default();
        if !self.verifier.verify_client(client_id, client_secret) {
            return Err(TokenError::WrongClient);
        }

        Ok(self.mint(false))
    }

    fn mint(&self, with_refresh: bool) -> TokenResponse {
        TokenResponse {
            access_token: random_token(),
            token_type: "Bearer".to_owned(),
            expires_in: self.ttl.as_secs(),
            refresh_token: with_refresh.then(random_token),
        }
    }
}

fn random_token() -> String {
    rng()
        .sample_iter(Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[debug_handler]
pub async fn issue_user_token(
    State(state): State<AppState>,
    Form(request): Form<TokenRequest>,
) -> Response {
    tracing::info!("Received /token request");

    match state.tokens.user_token(&request) {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(e) => {
            tracing::warn!("refusing user token: {e}");
            e.into_response()
        }
    }
}

#[debug_handler]
pub async fn issue_client_token(
    State(state): State<AppState>,
    Form(request): Form<TokenRequest>,
) -> Response {
    tracing::info!("Received /auth request");

    match state.tokens.client_token(&request) {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(e) => {
            tracing::warn!("refusing client token: {e}");
            e.into_response()
        }
    }
}

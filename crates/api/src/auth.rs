//! Multi-scheme authentication gate for protected fixture routes.
//!
//! Clients under test authenticate with either of two shared-secret forms: a
//! bearer token (`Authorization: Bearer <token>`) or an API key (`x-api-key`
//! header). Either one is sufficient on its own. Every failure collapses to
//! the same 401 so the client cannot distinguish a missing credential from a
//! wrong one.

use crate::error::ApiError;
use axum::http::{HeaderMap, header};

/// Header carrying the API-key credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Bearer token the fixture and its test caller agree on by default.
pub const DEFAULT_BEARER_TOKEN: &str = "test-secret-123";
/// API key the fixture and its test caller agree on by default.
pub const DEFAULT_API_KEY: &str = "test-key-456";

/// Shared secrets the gate verifies against. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct AuthSecrets {
    pub bearer_token: String,
    pub api_key: String,
}

impl Default for AuthSecrets {
    fn default() -> Self {
        Self {
            bearer_token: DEFAULT_BEARER_TOKEN.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

/// One credential presented on a request. Lives for that request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    ApiKey(String),
}

/// Outcome of the gate. Pure function of the presented credentials and the
/// process-wide secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVerdict {
    Authorized,
    Unauthorized,
}

fn extract_bearer(headers: &HeaderMap) -> Option<Credential> {
    let authz = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    // Exact-match policy: everything after the scheme prefix is the token,
    // untrimmed.
    let token = authz.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(Credential::Bearer(token.to_string()))
}

fn extract_api_key(headers: &HeaderMap) -> Option<Credential> {
    let value = headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok())?;
    if value.is_empty() {
        return None;
    }
    Some(Credential::ApiKey(value.to_string()))
}

/// Credential extractors in evaluation order. Order is fixed for
/// determinism; a present-but-wrong credential never blocks a later correct
/// one.
const EXTRACTORS: &[fn(&HeaderMap) -> Option<Credential>] = &[extract_bearer, extract_api_key];

fn matches_secret(secrets: &AuthSecrets, credential: &Credential) -> bool {
    match credential {
        Credential::Bearer(token) => *token == secrets.bearer_token,
        Credential::ApiKey(key) => *key == secrets.api_key,
    }
}

/// Decide whether a request carrying these headers may proceed.
///
/// The gate owns no state and issues no tokens; it only verifies.
#[must_use]
pub fn authorize(secrets: &AuthSecrets, headers: &HeaderMap) -> AuthVerdict {
    for extract in EXTRACTORS {
        if let Some(credential) = extract(headers)
            && matches_secret(secrets, &credential)
        {
            return AuthVerdict::Authorized;
        }
    }
    AuthVerdict::Unauthorized
}

/// Gate entry point for route handlers. Called before any store access on a
/// mutating route.
pub fn require_auth(secrets: &AuthSecrets, headers: &HeaderMap) -> Result<(), ApiError> {
    match authorize(secrets, headers) {
        AuthVerdict::Authorized => Ok(()),
        AuthVerdict::Unauthorized => Err(ApiError::Unauthorized),
    }
}

//! Session derivation and admin-gated capabilities.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider is external. All this module needs from it is the
//! current ID token, fetched fresh for every operation because claims can
//! change between sign-ins. The admin claim is read from the token payload
//! without verification: it only drives which buttons render, the backend
//! enforces the real check.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::error::AuthError;

/// Source of identity tokens.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Current ID token, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Token`] when a signed-in user's token cannot be minted.
    async fn id_token(&self) -> Result<Option<String>, AuthError>;
}

/// A fixed token, e.g. passed on the command line.
#[derive(Clone, Debug, Default)]
pub struct StaticToken(pub Option<String>);

impl SessionProvider for StaticToken {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.0.clone())
    }
}

/// Identity snapshot for one operation. Never stored across operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub signed_in: bool,
    pub token: Option<String>,
    pub is_admin: bool,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Derive a session from the provider's current token.
    #[must_use]
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) => Self { signed_in: true, is_admin: admin_claim(&token), token: Some(token) },
            None => Self::anonymous(),
        }
    }

    /// Ask the provider for a fresh session. Provider failures yield an
    /// anonymous session so rendering never blocks on auth.
    pub async fn fetch<S: SessionProvider>(provider: &S) -> Self {
        match provider.id_token().await {
            Ok(token) => Self::from_token(token),
            Err(err) => {
                log::warn!("session unavailable, rendering as anonymous: {err}");
                Self::anonymous()
            }
        }
    }
}

/// Whether the token's payload carries a truthy `admin` claim.
///
/// Truthiness follows JSON-ish rules: `true`, non-zero numbers, non-empty
/// strings, arrays and objects count; `false`, `0`, `""` and `null` do not.
#[must_use]
pub fn admin_claim(token: &str) -> bool {
    match token_claims(token) {
        Some(claims) => claims.get("admin").is_some_and(is_truthy),
        None => false,
    }
}

fn token_claims(token: &str) -> Option<serde_json::Map<String, Value>> {
    let payload = token.split('.').nth(1)?;
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return None;
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Admin-only affordances for one render.
///
/// Always derived from a fresh [`Session`]; holding on to a value across
/// navigations would show stale controls after a claim change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub create_album: bool,
    pub upload: bool,
    pub delete_album: bool,
    pub edit_photo: bool,
    pub delete_photo: bool,
}

impl Capabilities {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        let admin = session.signed_in && session.is_admin;
        Self { create_album: admin, upload: admin, delete_album: admin, edit_photo: admin, delete_photo: admin }
    }
}

//! In-memory fakes for exercising async flows without a network.

use std::cell::RefCell;
use std::collections::VecDeque;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::api::ApiClient;
use crate::config::ClientSettings;
use crate::error::AuthError;
use crate::session::SessionProvider;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replies from a FIFO script and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn reply_json(self, status: u16, body: &serde_json::Value) -> Self {
        let text = body.to_string();
        self.reply(status, &text)
    }

    pub(crate) fn unreachable(self, reason: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(TransportError(reason.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        match self.replies.borrow_mut().pop_front() {
            Some(reply) => reply,
            None => Err(TransportError("no scripted reply".to_owned())),
        }
    }
}

/// Identity whose token can be swapped between operations.
#[derive(Default)]
pub(crate) struct FakeIdentity {
    token: RefCell<Option<String>>,
    broken: RefCell<bool>,
}

impl FakeIdentity {
    pub(crate) fn signed_in(admin: bool) -> Self {
        let identity = Self::default();
        identity.set_token(Some(token_with_admin(admin)));
        identity
    }

    pub(crate) fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    pub(crate) fn break_tokens(&self) {
        *self.broken.borrow_mut() = true;
    }
}

impl SessionProvider for FakeIdentity {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        if *self.broken.borrow() {
            return Err(AuthError::Token("token refresh failed".to_owned()));
        }
        Ok(self.token.borrow().clone())
    }
}

/// Unsigned JWT-shaped token with the given claims payload.
pub(crate) fn token_with_claims(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}

pub(crate) fn token_with_admin(admin: bool) -> String {
    token_with_claims(&serde_json::json!({ "sub": "uid-1", "admin": admin }))
}

pub(crate) fn client(transport: ScriptedTransport, identity: FakeIdentity) -> ApiClient<ScriptedTransport, FakeIdentity> {
    ApiClient::new(transport, identity, ClientSettings::default())
}

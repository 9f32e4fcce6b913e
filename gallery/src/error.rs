//! Error taxonomy for the album client.
//!
//! Every error here is data returned through `Result`; callers decide whether
//! it renders inline (list loads) or as a blocking notice (actions).

use crate::transport::TransportError;

/// The identity provider could not produce a token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in failed: {0}")]
    SignIn(String),
    #[error("sign-out failed: {0}")]
    SignOut(String),
    #[error("token unavailable: {0}")]
    Token(String),
}

/// Client settings or identity-provider bootstrap problems.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field} URL `{value}`")]
    InvalidUrl { field: &'static str, value: String },
    #[error("config request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },
}

/// A backend call failed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx response. The raw body is kept so backend diagnostics surface.
    #[error("API error: {status} {body}")]
    Api { status: u16, body: String },
    /// 2xx response carrying an `{error}` field.
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status for [`ClientError::Api`] failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The storage PUT for one file did not succeed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("storage responded {0}")]
    Status(u16),
    #[error("storage unreachable: {0}")]
    Transport(#[from] TransportError),
}

/// Aggregate failure of one upload job. Exactly one is surfaced per job.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Select files")]
    EmptyBatch,
    #[error("Could not prepare upload: {0}")]
    Targets(#[source] ClientError),
    #[error("No upload target returned for {filename}")]
    NoTarget { filename: String },
    #[error("Upload failed for {filename}")]
    Transfer {
        filename: String,
        #[source]
        source: TransferError,
    },
    /// The object reached storage but no Photo record exists for it.
    #[error("Uploaded {filename} but could not register it: {source}")]
    Registration {
        filename: String,
        blob_path: String,
        #[source]
        source: ClientError,
    },
}

impl UploadError {
    /// Storage path of an object left without a Photo record, if any.
    #[must_use]
    pub fn orphaned_blob(&self) -> Option<&str> {
        match self {
            Self::Registration { blob_path, .. } => Some(blob_path),
            _ => None,
        }
    }
}

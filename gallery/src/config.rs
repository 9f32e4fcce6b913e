//! Client settings and identity-provider bootstrap.
//!
//! The browser does not ship its identity-provider config; it asks the backend
//! for it at load. Two sources are tried in order, and when both fail a
//! placeholder config is used so the page still renders (sign-in will then
//! fail, which is the accepted degraded state).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::transport::{HttpRequest, Method, Transport};

pub const DEFAULT_CONFIG_PATH: &str = "/api/config";
pub const DEFAULT_CONFIG_FALLBACK_URL: &str = "http://localhost:5000/config";
pub const DEFAULT_PUBLIC_STORAGE_BASE: &str = "https://storage.googleapis.com";
pub const PLACEHOLDER_API_KEY: &str = "REPLACE_ME";

/// Where the backend and storage live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    /// Origin prefixed to `/api/...` paths. Empty means same-origin.
    pub api_base: String,
    /// Secondary origin for the identity-provider config.
    pub config_fallback_url: String,
    /// Base URL that public object URLs are built on.
    pub public_storage_base: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            config_fallback_url: DEFAULT_CONFIG_FALLBACK_URL.to_owned(),
            public_storage_base: DEFAULT_PUBLIC_STORAGE_BASE.to_owned(),
        }
    }
}

impl ClientSettings {
    /// Settings for a backend at `api_base`, other fields defaulted.
    #[must_use]
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into().trim_end_matches('/').to_owned(), ..Self::default() }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for a non-empty `api_base` that is
    /// not absolute, or unusable fallback/storage URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base.is_empty() {
            absolute_url("api_base", &self.api_base)?;
        }
        absolute_url("config_fallback_url", &self.config_fallback_url)?;
        absolute_url("public_storage_base", &self.public_storage_base)?;
        Ok(())
    }

    /// Absolute (or same-origin relative) URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.trim_end_matches('/'))
    }

    /// Public URL of a stored object: the blob path is appended to the
    /// storage base as one percent-encoded segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the storage base is unusable.
    pub fn public_object_url(&self, blob_path: &str) -> Result<String, ConfigError> {
        let mut url = absolute_url("public_storage_base", &self.public_storage_base)?;
        {
            let Ok(mut segments) = url.path_segments_mut() else {
                return Err(invalid("public_storage_base", &self.public_storage_base));
            };
            segments.pop_if_empty().push(blob_path);
        }
        Ok(url.into())
    }
}

fn absolute_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    match Url::parse(value) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidUrl { field, value: value.to_owned() }
}

/// Identity-provider client config as served by `/api/config`.
///
/// Only the commonly used keys are typed; anything else is carried through to
/// the provider untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IdentityConfig {
    /// Non-functional config used when bootstrap fails.
    #[must_use]
    pub fn placeholder() -> Self {
        Self { api_key: Some(PLACEHOLDER_API_KEY.to_owned()), ..Self::default() }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.api_key.as_deref() == Some(PLACEHOLDER_API_KEY)
    }
}

/// Which source produced the identity config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Primary,
    Fallback,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bootstrap {
    pub config: IdentityConfig,
    pub source: ConfigSource,
}

/// Fetch the identity config from the primary path, then the fallback origin,
/// then settle for the placeholder. Never fails.
pub async fn bootstrap<T: Transport>(transport: &T, settings: &ClientSettings) -> Bootstrap {
    let primary = settings.endpoint(DEFAULT_CONFIG_PATH);
    match fetch_config(transport, &primary).await {
        Ok(config) => return Bootstrap { config, source: ConfigSource::Primary },
        Err(err) => log::warn!("{err}; trying fallback"),
    }
    match fetch_config(transport, &settings.config_fallback_url).await {
        Ok(config) => Bootstrap { config, source: ConfigSource::Fallback },
        Err(err) => {
            log::error!("{err}; sign-in will not work until config is served");
            Bootstrap { config: IdentityConfig::placeholder(), source: ConfigSource::Placeholder }
        }
    }
}

/// Fetch one config document. Config is public, so no bearer token is sent.
///
/// # Errors
///
/// Returns [`ConfigError::Fetch`] for transport failures, non-2xx statuses,
/// and bodies that are not a config object.
pub async fn fetch_config<T: Transport>(transport: &T, url: &str) -> Result<IdentityConfig, ConfigError> {
    let fetch_err = |reason: String| ConfigError::Fetch { url: url.to_owned(), reason };
    let resp = transport
        .send(HttpRequest::new(Method::Get, url))
        .await
        .map_err(|e| fetch_err(e.to_string()))?;
    if !resp.is_success() {
        return Err(fetch_err(format!("status {}", resp.status)));
    }
    serde_json::from_str(&resp.body).map_err(|e| fetch_err(e.to_string()))
}

//! Browser implementations of the `gallery` I/O seams.
//!
//! `http` carries requests over `fetch`; `identity` talks to the identity
//! provider's page script. Outside the `csr` feature both compile to inert
//! stand-ins so the crate still builds and tests on the host.

pub mod http;
pub mod identity;

use gallery::api::ApiClient;

/// API client as wired in the browser.
pub type BrowserApi = ApiClient<http::GlooTransport, identity::BrowserIdentity>;

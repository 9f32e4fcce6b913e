//! Identity-provider bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider SDK runs as a page script (see `index.html`) and exposes a
//! small surface on `window`:
//!
//! | Function | Purpose |
//! |----------|---------|
//! | `galleryIdpInit(config)` | initialise the SDK with the bootstrap config |
//! | `galleryIdpIdToken()` | resolve to the current ID token or `null` |
//! | `galleryIdpSignIn()` | open the sign-in popup |
//! | `galleryIdpSignOut()` | end the session |
//! | `galleryIdpOnAuthChanged(cb)` | call `cb(signedIn)` on every auth change |
//!
//! Tokens are never cached here; every call asks the SDK, which refreshes
//! expired tokens itself.

#![allow(clippy::unused_async)]

use gallery::config::IdentityConfig;
use gallery::error::AuthError;
use gallery::session::SessionProvider;

#[cfg(feature = "csr")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = window, js_name = galleryIdpInit, catch)]
        pub fn init(config: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = window, js_name = galleryIdpIdToken, catch)]
        pub async fn id_token() -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_namespace = window, js_name = galleryIdpSignIn, catch)]
        pub async fn sign_in() -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_namespace = window, js_name = galleryIdpSignOut, catch)]
        pub async fn sign_out() -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_namespace = window, js_name = galleryIdpOnAuthChanged)]
        pub fn on_auth_changed(callback: &Closure<dyn FnMut(bool)>);
    }
}

/// [`SessionProvider`] backed by the page's identity SDK.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserIdentity;

impl SessionProvider for BrowserIdentity {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        #[cfg(feature = "csr")]
        {
            let token = bindings::id_token().await.map_err(|e| AuthError::Token(js_message(&e)))?;
            Ok(token.as_string())
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(None)
        }
    }
}

impl BrowserIdentity {
    /// Initialise the SDK. A failure is logged and leaves the app anonymous.
    pub fn init(config: &IdentityConfig) {
        if config.is_placeholder() {
            log::warn!("identity provider is not configured; sign-in will fail");
        }
        #[cfg(feature = "csr")]
        {
            let parsed = serde_json::to_string(config)
                .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
                .and_then(|json| js_sys::JSON::parse(&json));
            if let Err(err) = parsed.and_then(|value| bindings::init(&value)) {
                log::error!("identity provider init failed: {}", js_message(&err));
            }
        }
    }

    /// Invoke `on_change(signed_in)` on every auth state change for the
    /// lifetime of the page.
    pub fn watch(on_change: impl FnMut(bool) + 'static) {
        #[cfg(feature = "csr")]
        {
            let callback = wasm_bindgen::closure::Closure::<dyn FnMut(bool)>::new(on_change);
            bindings::on_auth_changed(&callback);
            callback.forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            drop(on_change);
        }
    }

    /// # Errors
    ///
    /// [`AuthError::SignIn`] if the popup fails or is dismissed.
    pub async fn sign_in(&self) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            bindings::sign_in().await.map_err(|e| AuthError::SignIn(js_message(&e)))?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`AuthError::SignOut`] if the provider rejects the request.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            bindings::sign_out().await.map_err(|e| AuthError::SignOut(js_message(&e)))?;
        }
        Ok(())
    }
}

/// Best-effort human text from a thrown JS value.
#[cfg(feature = "csr")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast as _;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

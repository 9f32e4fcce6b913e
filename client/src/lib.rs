//! # client
//!
//! Leptos + WASM frontend for the photo album service.
//!
//! All album, photo, and upload logic lives in the `gallery` crate. This crate
//! supplies the browser pieces around it: a `gloo-net` transport, bindings to
//! the identity provider's page script, and the pages and dialogs that render
//! a [`gallery::state::GalleryState`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and the panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&err.to_string().into());
    }
    leptos::mount::mount_to_body(app::App);
}

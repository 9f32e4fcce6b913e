//! Core album/photo client logic shared by the browser UI and the CLI.
//!
//! Nothing in this crate touches the DOM or a concrete HTTP stack. Network
//! access goes through the [`transport::Transport`] trait and identity through
//! [`session::SessionProvider`], so every flow here runs the same way in the
//! WASM client, the native CLI, and unit tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Wire DTOs for albums, photos, upload targets |
//! | [`transport`] | Minimal HTTP request/response seam |
//! | [`session`] | Session derivation, admin claim, per-render capabilities |
//! | [`api`] | Bearer-authenticated backend client |
//! | [`config`] | Client settings and identity-provider bootstrap |
//! | [`nav`] | Four-view navigation value type with stale-result tickets |
//! | [`directory`] | Album and photo list loading for rendering |
//! | [`upload`] | Sequential target → transfer → register orchestration |
//! | [`state`] | View-state coordinator tying the above together |
//! | [`error`] | Error taxonomy |

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod nav;
pub mod session;
pub mod state;
pub mod transport;
pub mod types;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

//! Shared client-side state.
//!
//! DESIGN
//! ======
//! The view state itself is `gallery::state::GalleryState`, held in one
//! `RwSignal`. [`actions::Gallery`] pairs that signal with the API client and
//! is what components take from context to trigger navigation and requests.

pub mod actions;

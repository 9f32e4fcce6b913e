//! Album and photo list loading for one render pass.
//!
//! A load never fails past this boundary: errors become
//! [`Listing::Failed`] text for the view to show in place of the list, and the
//! admin controls are recomputed from a fresh session on every load.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use crate::api::ApiClient;
use crate::session::{Capabilities, SessionProvider};
use crate::transport::Transport;
use crate::types::{Album, Photo};

/// Render state of one list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Listing<T> {
    #[default]
    Loading,
    Loaded(Vec<T>),
    /// Terminal for this render; re-navigating loads again.
    Failed(String),
}

impl<T> Listing<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A list together with the controls to show next to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub listing: Listing<T>,
    pub controls: Capabilities,
}

/// Fetch the album list and the caller's current capabilities.
pub async fn load_albums<T: Transport, S: SessionProvider>(api: &ApiClient<T, S>) -> Page<Album> {
    let listing = match api.list_albums().await {
        Ok(albums) => Listing::Loaded(albums),
        Err(err) => {
            log::warn!("album list failed: {err}");
            Listing::Failed(format!("Error: {err}"))
        }
    };
    let controls = Capabilities::for_session(&api.session().await);
    Page { listing, controls }
}

/// Fetch one album's photos and the caller's current capabilities.
pub async fn load_photos<T: Transport, S: SessionProvider>(api: &ApiClient<T, S>, album_id: &str) -> Page<Photo> {
    let listing = match api.list_photos(album_id).await {
        Ok(photos) => Listing::Loaded(photos),
        Err(err) => {
            log::warn!("photo list for album {album_id} failed: {err}");
            Listing::Failed(format!("Error: {err}"))
        }
    };
    let controls = Capabilities::for_session(&api.session().await);
    Page { listing, controls }
}

/// Capabilities alone, for views without a list (the photo view).
pub async fn load_controls<T: Transport, S: SessionProvider>(api: &ApiClient<T, S>) -> Capabilities {
    Capabilities::for_session(&api.session().await)
}

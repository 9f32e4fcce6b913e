//! Four-view navigation as an explicit value type.
//!
//! DESIGN
//! ======
//! Exactly one view is active, and the selections each view needs live inside
//! its variant, so "photo view without a photo" cannot be represented.
//! Transitions take `&self` and return the next value; the caller swaps it in.
//!
//! Every transition bumps a generation counter. Async work captures a
//! [`ViewTicket`] when it starts and checks [`Navigation::accepts`] before
//! applying its result, so a slow response for a view the user already left
//! never overwrites newer state.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::fmt;

use crate::types::{Album, Photo};

/// Which view is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Albums,
    Album,
    Upload,
    Photo,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Albums => "albums",
            Self::Album => "album",
            Self::Upload => "upload",
            Self::Photo => "photo",
        })
    }
}

/// The active view together with the selections it is parameterized by.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Albums,
    Album(Album),
    Upload(Album),
    Photo { album: Album, photo: Photo },
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Albums => ViewKind::Albums,
            Self::Album(_) => ViewKind::Album,
            Self::Upload(_) => ViewKind::Upload,
            Self::Photo { .. } => ViewKind::Photo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("cannot {action} from the {from} view")]
    InvalidTransition { action: &'static str, from: ViewKind },
    #[error("an upload is in progress")]
    UploadInProgress,
}

/// Identifies the navigation state an async request was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    screen: Screen,
    generation: u64,
}

impl Navigation {
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn view(&self) -> ViewKind {
        self.screen.kind()
    }

    /// Current album for the album, upload and photo views.
    #[must_use]
    pub fn album(&self) -> Option<&Album> {
        match &self.screen {
            Screen::Albums => None,
            Screen::Album(album) | Screen::Upload(album) | Screen::Photo { album, .. } => Some(album),
        }
    }

    #[must_use]
    pub fn photo(&self) -> Option<&Photo> {
        match &self.screen {
            Screen::Photo { photo, .. } => Some(photo),
            _ => None,
        }
    }

    #[must_use]
    pub fn ticket(&self) -> ViewTicket {
        ViewTicket { generation: self.generation }
    }

    /// Whether a result issued under `ticket` still belongs to this state.
    #[must_use]
    pub fn accepts(&self, ticket: ViewTicket) -> bool {
        ticket.generation == self.generation
    }

    fn enter(&self, screen: Screen) -> Self {
        Self { screen, generation: self.generation.wrapping_add(1) }
    }

    fn invalid(&self, action: &'static str) -> NavError {
        NavError::InvalidTransition { action, from: self.view() }
    }

    /// Show the album list and clear both selections. Valid from anywhere.
    #[must_use]
    pub fn show_albums(&self) -> Self {
        self.enter(Screen::Albums)
    }

    /// Sign-out lands on the album list with nothing selected.
    #[must_use]
    pub fn sign_out(&self) -> Self {
        self.show_albums()
    }

    /// Open (or re-open) an album. Valid from anywhere; clears the photo.
    #[must_use]
    pub fn open_album(&self, album: Album) -> Self {
        self.enter(Screen::Album(album))
    }

    /// `album → upload`, keeping the current album.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the album view.
    pub fn start_upload(&self) -> Result<Self, NavError> {
        match &self.screen {
            Screen::Album(album) => Ok(self.enter(Screen::Upload(album.clone()))),
            _ => Err(self.invalid("start an upload")),
        }
    }

    /// `upload → album` on cancel or completion.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the upload view.
    pub fn finish_upload(&self) -> Result<Self, NavError> {
        match &self.screen {
            Screen::Upload(album) => Ok(self.enter(Screen::Album(album.clone()))),
            _ => Err(self.invalid("leave the upload")),
        }
    }

    /// `album → photo`.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the album view.
    pub fn open_photo(&self, photo: Photo) -> Result<Self, NavError> {
        match &self.screen {
            Screen::Album(album) => Ok(self.enter(Screen::Photo { album: album.clone(), photo })),
            _ => Err(self.invalid("open a photo")),
        }
    }

    /// `photo → album`, clearing the photo.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the photo view.
    pub fn close_photo(&self) -> Result<Self, NavError> {
        match &self.screen {
            Screen::Photo { album, .. } => Ok(self.enter(Screen::Album(album.clone()))),
            _ => Err(self.invalid("close the photo")),
        }
    }

    /// Immediate parent view. There is no history stack.
    #[must_use]
    pub fn back(&self) -> Self {
        match &self.screen {
            Screen::Albums | Screen::Album(_) => self.show_albums(),
            Screen::Upload(album) | Screen::Photo { album, .. } => self.enter(Screen::Album(album.clone())),
        }
    }

    /// Patch the selected photo in place (e.g. after a description edit).
    /// Not a transition: the generation is unchanged.
    pub fn update_photo(&mut self, update: impl FnOnce(&mut Photo)) {
        if let Screen::Photo { photo, .. } = &mut self.screen {
            update(photo);
        }
    }
}

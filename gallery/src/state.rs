//! View-state coordinator for the album client.
//!
//! DESIGN
//! ======
//! [`GalleryState`] is plain data plus synchronous transitions. Async work
//! happens outside it: a handler calls a `begin`-style method, receives a
//! [`ViewTicket`], awaits the network, and hands the result back through an
//! `apply`-style method that drops it if the ticket went stale. The browser
//! keeps one of these in a signal; tests drive it directly.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt::Display;

use crate::directory::{Listing, Page};
use crate::error::UploadError;
use crate::nav::{NavError, Navigation, ViewKind, ViewTicket};
use crate::session::Capabilities;
use crate::types::{Album, Photo};
use crate::upload::UploadSummary;

/// Message the user must acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Error(m) => m,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub nav: Navigation,
    pub signed_in: bool,
    pub albums: Listing<Album>,
    pub photos: Listing<Photo>,
    /// Admin affordances for the current view only. Reset on every entry.
    pub controls: Capabilities,
    pub notice: Option<Notice>,
    /// Status lines of the running or last upload on this upload view.
    pub upload_log: Vec<String>,
    /// Ticket of the running upload job, if any. At most one job runs.
    pub upload: Option<ViewTicket>,
}

impl GalleryState {
    #[must_use]
    pub fn view(&self) -> ViewKind {
        self.nav.view()
    }

    /// Whether an upload job is still running.
    #[must_use]
    pub fn uploading(&self) -> bool {
        self.upload.is_some()
    }

    /// Whether the running job belongs to the view on screen. Only then is
    /// leaving the view refused.
    fn upload_pinned(&self) -> bool {
        self.upload.is_some_and(|job| self.nav.accepts(job))
    }

    /// Identity changed. Signing in loads the album list; signing out drops
    /// to the album list with no selection. A running upload job keeps its
    /// slot until it settles.
    pub fn set_signed_in(&mut self, signed_in: bool) -> Option<ViewTicket> {
        self.signed_in = signed_in;
        if signed_in {
            return Some(self.show_albums());
        }
        self.nav = self.nav.sign_out();
        self.albums = Listing::Loaded(Vec::new());
        self.photos = Listing::Loading;
        self.controls = Capabilities::none();
        self.upload_log.clear();
        None
    }

    /// Enter the album list; the caller loads it under the returned ticket.
    pub fn show_albums(&mut self) -> ViewTicket {
        self.nav = self.nav.show_albums();
        self.enter_view();
        self.albums = Listing::Loading;
        self.nav.ticket()
    }

    /// Enter an album; the caller loads its photos under the returned ticket.
    pub fn open_album(&mut self, album: Album) -> ViewTicket {
        self.nav = self.nav.open_album(album);
        self.enter_view();
        self.photos = Listing::Loading;
        self.nav.ticket()
    }

    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the album view.
    pub fn open_photo(&mut self, photo: Photo) -> Result<ViewTicket, NavError> {
        self.nav = self.nav.open_photo(photo)?;
        self.enter_view();
        Ok(self.nav.ticket())
    }

    /// Back to the album view without re-fetching photos.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the photo view.
    pub fn close_photo(&mut self) -> Result<ViewTicket, NavError> {
        self.nav = self.nav.close_photo()?;
        self.enter_view();
        Ok(self.nav.ticket())
    }

    /// # Errors
    ///
    /// [`NavError::InvalidTransition`] outside the album view.
    pub fn start_upload(&mut self) -> Result<ViewTicket, NavError> {
        self.nav = self.nav.start_upload()?;
        self.enter_view();
        self.upload_log.clear();
        Ok(self.nav.ticket())
    }

    /// Leave the upload view before starting. Refused once a job runs.
    ///
    /// # Errors
    ///
    /// [`NavError::UploadInProgress`] while this view's job runs, or
    /// [`NavError::InvalidTransition`] outside the upload view.
    pub fn cancel_upload(&mut self) -> Result<ViewTicket, NavError> {
        if self.upload_pinned() {
            return Err(NavError::UploadInProgress);
        }
        self.nav = self.nav.finish_upload()?;
        self.enter_view();
        Ok(self.nav.ticket())
    }

    /// Mark a job as running on the current upload view.
    ///
    /// # Errors
    ///
    /// [`NavError::UploadInProgress`] if one already runs, or
    /// [`NavError::InvalidTransition`] outside the upload view.
    pub fn begin_upload(&mut self) -> Result<ViewTicket, NavError> {
        if self.uploading() {
            return Err(NavError::UploadInProgress);
        }
        if self.view() != ViewKind::Upload {
            return Err(NavError::InvalidTransition { action: "start an upload", from: self.view() });
        }
        let ticket = self.nav.ticket();
        self.upload = Some(ticket);
        self.upload_log.clear();
        Ok(ticket)
    }

    /// Append one status line if the job's view is still showing.
    pub fn push_upload_line(&mut self, ticket: ViewTicket, line: String) {
        if self.nav.accepts(ticket) {
            self.upload_log.push(line);
        }
    }

    /// Settle a job. Success returns to the album view and hands back a
    /// ticket for re-fetching its photos; failure stays on the upload view
    /// with one error notice.
    ///
    /// A job that is not the running one changes nothing. The running job
    /// frees its slot even after its view is gone, but then shows no notice.
    pub fn finish_upload(&mut self, ticket: ViewTicket, result: Result<UploadSummary, UploadError>) -> Option<ViewTicket> {
        if self.upload != Some(ticket) {
            log::debug!("discarding result of a superseded upload job");
            return None;
        }
        self.upload = None;
        if !self.nav.accepts(ticket) {
            match &result {
                Ok(summary) => log::info!("upload settled off-screen: {} photos registered", summary.registered),
                Err(err) => log::warn!("upload failed off-screen: {err}"),
            }
            return None;
        }
        match result {
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                None
            }
            Ok(summary) => {
                self.notice = Some(Notice::Info("All uploaded".to_owned()));
                log::info!("upload finished: {} photos registered", summary.registered);
                let Ok(next) = self.nav.finish_upload() else {
                    return None;
                };
                self.nav = next;
                self.enter_view();
                self.photos = Listing::Loading;
                Some(self.nav.ticket())
            }
        }
    }

    /// Install a loaded album list. Returns `false` for stale results.
    pub fn apply_albums(&mut self, ticket: ViewTicket, page: Page<Album>) -> bool {
        if !self.accept(ticket, "album list") {
            return false;
        }
        self.albums = page.listing;
        self.controls = page.controls;
        true
    }

    /// Install a loaded photo list. Returns `false` for stale results.
    pub fn apply_photos(&mut self, ticket: ViewTicket, page: Page<Photo>) -> bool {
        if !self.accept(ticket, "photo list") {
            return false;
        }
        self.photos = page.listing;
        self.controls = page.controls;
        true
    }

    /// Install controls for a view without a list. Returns `false` for stale results.
    pub fn apply_controls(&mut self, ticket: ViewTicket, controls: Capabilities) -> bool {
        if !self.accept(ticket, "controls") {
            return false;
        }
        self.controls = controls;
        true
    }

    /// Album `album_id` was deleted. If it is still on screen, acknowledge
    /// and return to a reloading album list; the list view itself reloads
    /// too. Anywhere else the user has moved on and nothing changes.
    pub fn album_deleted(&mut self, album_id: &str) -> Option<ViewTicket> {
        let showing = match self.view() {
            ViewKind::Albums => true,
            ViewKind::Album => self.nav.album().is_some_and(|a| a.id == album_id),
            ViewKind::Upload | ViewKind::Photo => false,
        };
        if !showing {
            log::debug!("album {album_id} deleted after the view moved on");
            return None;
        }
        self.notice = Some(Notice::Info("Deleted".to_owned()));
        Some(self.show_albums())
    }

    /// Photo `photo_id` of `album_id` was deleted. If it is still on screen,
    /// acknowledge and return to its album for a reload. An album view of
    /// the same album reloads as well; any other view is left alone.
    pub fn photo_deleted(&mut self, album_id: &str, photo_id: &str) -> Option<ViewTicket> {
        let showing = match self.view() {
            ViewKind::Photo => self.nav.photo().is_some_and(|p| p.id == photo_id),
            ViewKind::Album => true,
            ViewKind::Albums | ViewKind::Upload => false,
        };
        let album = self.nav.album().filter(|a| a.id == album_id).cloned();
        let Some(album) = album.filter(|_| showing) else {
            log::debug!("photo {photo_id} deleted after the view moved on");
            return None;
        };
        self.notice = Some(Notice::Info("Deleted".to_owned()));
        Some(self.open_album(album))
    }

    /// A description edit succeeded: patch the photo wherever it is shown.
    /// The acknowledgement appears only while that photo is still open.
    pub fn description_updated(&mut self, photo_id: &str, description: &str) {
        self.nav.update_photo(|p| {
            if p.id == photo_id {
                description.clone_into(&mut p.description);
            }
        });
        if let Listing::Loaded(photos) = &mut self.photos {
            for photo in photos.iter_mut().filter(|p| p.id == photo_id) {
                description.clone_into(&mut photo.description);
            }
        }
        if self.nav.photo().is_some_and(|p| p.id == photo_id) {
            self.notice = Some(Notice::Info("Updated".to_owned()));
        }
    }

    /// An album was created: reload the list. No acknowledgement is shown.
    pub fn album_created(&mut self) -> ViewTicket {
        self.show_albums()
    }

    /// An action failed. Prior state is left as it was.
    pub fn action_failed(&mut self, err: &dyn Display) {
        self.notice = Some(Notice::Error(err.to_string()));
    }

    pub fn acknowledge(&mut self) {
        self.notice = None;
    }

    /// Go to the parent view. Landing on the album list marks it for reload;
    /// landing on an album keeps the photos already shown.
    ///
    /// # Errors
    ///
    /// [`NavError::UploadInProgress`] while this view's job runs.
    pub fn back(&mut self) -> Result<ViewTicket, NavError> {
        if self.upload_pinned() {
            return Err(NavError::UploadInProgress);
        }
        self.nav = self.nav.back();
        self.enter_view();
        if self.view() == ViewKind::Albums {
            self.albums = Listing::Loading;
        }
        Ok(self.nav.ticket())
    }

    fn enter_view(&mut self) {
        self.controls = Capabilities::none();
    }

    fn accept(&self, ticket: ViewTicket, what: &str) -> bool {
        let fresh = self.nav.accepts(ticket);
        if !fresh {
            log::debug!("discarding stale {what}");
        }
        fresh
    }
}

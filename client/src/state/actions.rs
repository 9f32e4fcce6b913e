//! User actions: synchronous state transitions plus the requests they start.
//!
//! Every async action captures a `ViewTicket` before awaiting and applies its
//! result through `GalleryState`, which drops results for views the user has
//! already left.

use std::future::Future;
use std::sync::Arc;

use gallery::directory;
use gallery::nav::{ViewKind, ViewTicket};
use gallery::state::GalleryState;
use gallery::types::{Album, Photo};
use gallery::upload::{self, LocalFile, UploadJob};
use leptos::prelude::*;

use crate::net::BrowserApi;

/// Copyable handle provided through context.
#[derive(Clone, Copy)]
pub struct Gallery {
    pub state: RwSignal<GalleryState>,
    api: StoredValue<Arc<BrowserApi>>,
}

impl Gallery {
    pub fn new(api: BrowserApi) -> Self {
        Self { state: RwSignal::new(GalleryState::default()), api: StoredValue::new(Arc::new(api)) }
    }

    fn api(self) -> Arc<BrowserApi> {
        self.api.get_value()
    }

    /// Fetch the identity config, start the SDK, and follow auth changes.
    pub fn bootstrap(self) {
        spawn(async move {
            let api = self.api();
            let boot = gallery::config::bootstrap(api.transport(), api.settings()).await;
            log::info!("identity config loaded from {:?}", boot.source);
            crate::net::identity::BrowserIdentity::init(&boot.config);
            crate::net::identity::BrowserIdentity::watch(move |signed_in| self.auth_changed(signed_in));
        });
    }

    fn auth_changed(self, signed_in: bool) {
        log::info!("auth state changed: signed_in={signed_in}");
        let mut ticket = None;
        self.state.update(|s| ticket = s.set_signed_in(signed_in));
        if let Some(ticket) = ticket {
            self.load_albums(ticket);
        }
    }

    pub fn sign_in(self) {
        spawn(async move {
            if let Err(err) = self.api().identity().sign_in().await {
                self.state.update(|s| s.action_failed(&err));
            }
        });
    }

    pub fn sign_out(self) {
        spawn(async move {
            if let Err(err) = self.api().identity().sign_out().await {
                self.state.update(|s| s.action_failed(&err));
            }
        });
    }

    // =============================================================
    // Navigation
    // =============================================================

    pub fn show_albums(self) {
        let mut ticket = None;
        self.state.update(|s| ticket = Some(s.show_albums()));
        if let Some(ticket) = ticket {
            self.load_albums(ticket);
        }
    }

    pub fn open_album(self, album: Album) {
        let album_id = album.id.clone();
        let mut ticket = None;
        self.state.update(|s| ticket = Some(s.open_album(album)));
        if let Some(ticket) = ticket {
            self.load_photos(ticket, album_id);
        }
    }

    pub fn open_photo(self, photo: Photo) {
        let mut entered = None;
        self.state.update(|s| entered = Some(s.open_photo(photo)));
        match entered {
            Some(Ok(ticket)) => self.load_controls(ticket),
            Some(Err(err)) => log::warn!("{err}"),
            None => {}
        }
    }

    pub fn close_photo(self) {
        let mut closed = None;
        self.state.update(|s| closed = Some(s.close_photo()));
        match closed {
            Some(Ok(ticket)) => self.load_controls(ticket),
            Some(Err(err)) => log::warn!("{err}"),
            None => {}
        }
    }

    pub fn start_upload(self) {
        let mut entered = None;
        self.state.update(|s| entered = Some(s.start_upload()));
        if let Some(Err(err)) = entered {
            log::warn!("{err}");
        }
    }

    pub fn cancel_upload(self) {
        let mut left = None;
        self.state.update(|s| left = Some(s.cancel_upload()));
        match left {
            Some(Ok(ticket)) => self.load_controls(ticket),
            Some(Err(err)) => log::warn!("{err}"),
            None => {}
        }
    }

    pub fn back(self) {
        let mut moved = None;
        self.state.update(|s| moved = Some(s.back()));
        match moved {
            Some(Ok(ticket)) => self.reload_current(ticket),
            Some(Err(err)) => log::warn!("{err}"),
            None => {}
        }
    }

    // =============================================================
    // Loads
    // =============================================================

    fn reload_current(self, ticket: ViewTicket) {
        let (view, album_id) = self.state.with_untracked(|s| (s.view(), s.nav.album().map(|a| a.id.clone())));
        match (view, album_id) {
            (ViewKind::Albums, _) => self.load_albums(ticket),
            (ViewKind::Album, Some(album_id)) if self.state.with_untracked(|s| s.photos.is_loading()) => {
                self.load_photos(ticket, album_id);
            }
            _ => self.load_controls(ticket),
        }
    }

    fn load_albums(self, ticket: ViewTicket) {
        spawn(async move {
            let page = directory::load_albums(self.api().as_ref()).await;
            self.state.update(|s| {
                s.apply_albums(ticket, page);
            });
        });
    }

    fn load_photos(self, ticket: ViewTicket, album_id: String) {
        spawn(async move {
            let page = directory::load_photos(self.api().as_ref(), &album_id).await;
            self.state.update(|s| {
                s.apply_photos(ticket, page);
            });
        });
    }

    fn load_controls(self, ticket: ViewTicket) {
        spawn(async move {
            let controls = directory::load_controls(self.api().as_ref()).await;
            self.state.update(|s| {
                s.apply_controls(ticket, controls);
            });
        });
    }

    // =============================================================
    // Mutations
    // =============================================================

    pub fn create_album(self, title: String) {
        spawn(async move {
            match self.api().create_album(&title, "").await {
                Ok(id) => {
                    log::info!("created album {id}");
                    let mut ticket = None;
                    self.state.update(|s| ticket = Some(s.album_created()));
                    if let Some(ticket) = ticket {
                        self.load_albums(ticket);
                    }
                }
                Err(err) => self.state.update(|s| s.action_failed(&err)),
            }
        });
    }

    pub fn delete_album(self) {
        let Some(album_id) = self.current_album_id() else {
            return;
        };
        spawn(async move {
            match self.api().delete_album(&album_id).await {
                Ok(()) => {
                    let mut ticket = None;
                    self.state.update(|s| ticket = s.album_deleted(&album_id));
                    if let Some(ticket) = ticket {
                        self.load_albums(ticket);
                    }
                }
                Err(err) => self.state.update(|s| s.action_failed(&err)),
            }
        });
    }

    /// Upload `files` into the current album, one at a time.
    pub fn upload(self, files: Vec<LocalFile>) {
        let Some(album_id) = self.current_album_id() else {
            return;
        };
        let mut begun = None;
        self.state.update(|s| begun = Some(s.begin_upload()));
        let ticket = match begun {
            Some(Ok(ticket)) => ticket,
            Some(Err(err)) => {
                self.state.update(|s| s.action_failed(&err));
                return;
            }
            None => return,
        };

        let mut job = match UploadJob::new(album_id, files) {
            Ok(job) => job,
            Err(err) => {
                self.state.update(|s| {
                    s.finish_upload(ticket, Err(err));
                });
                return;
            }
        };
        spawn(async move {
            let state = self.state;
            let result = upload::run(self.api().as_ref(), &mut job, |event| {
                if let Some(line) = event.status_line() {
                    state.update(|s| s.push_upload_line(ticket, line));
                }
            })
            .await;
            let mut refetch = None;
            state.update(|s| refetch = s.finish_upload(ticket, result));
            if let (Some(refetch), Some(current)) = (refetch, self.current_album_id()) {
                self.load_photos(refetch, current);
            }
        });
    }

    pub fn update_description(self, description: String) {
        let Some((album_id, photo_id)) = self.current_photo_ids() else {
            return;
        };
        spawn(async move {
            match self.api().update_description(&album_id, &photo_id, &description).await {
                Ok(()) => self.state.update(|s| s.description_updated(&photo_id, &description)),
                Err(err) => self.state.update(|s| s.action_failed(&err)),
            }
        });
    }

    pub fn delete_photo(self) {
        let Some((album_id, photo_id)) = self.current_photo_ids() else {
            return;
        };
        spawn(async move {
            match self.api().delete_photo(&album_id, &photo_id).await {
                Ok(()) => {
                    let mut ticket = None;
                    self.state.update(|s| ticket = s.photo_deleted(&album_id, &photo_id));
                    if let (Some(ticket), Some(current)) = (ticket, self.current_album_id()) {
                        self.load_photos(ticket, current);
                    }
                }
                Err(err) => self.state.update(|s| s.action_failed(&err)),
            }
        });
    }

    pub fn acknowledge(self) {
        self.state.update(GalleryState::acknowledge);
    }

    fn current_album_id(self) -> Option<String> {
        self.state.with_untracked(|s| s.nav.album().map(|a| a.id.clone()))
    }

    fn current_photo_ids(self) -> Option<(String, String)> {
        self.state.with_untracked(|s| {
            let album = s.nav.album()?;
            let photo = s.nav.photo()?;
            Some((album.id.clone(), photo.id.clone()))
        })
    }
}

/// Run browser work on the page's executor. Host builds have no executor.
fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "csr"))]
    drop(task);
}

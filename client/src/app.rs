//! Root application component with the context provider and view switch.

use gallery::api::ApiClient;
use gallery::config::ClientSettings;
use gallery::nav::ViewKind;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::notice_dialog::NoticeDialog;
use crate::components::toolbar::Toolbar;
use crate::net::http::GlooTransport;
use crate::net::identity::BrowserIdentity;
use crate::pages::{album::AlbumPage, albums::AlbumsPage, photo::PhotoPage, upload::UploadPage};
use crate::state::actions::Gallery;

/// Root application component.
///
/// There is no router: the four views are a single state machine, so the
/// visible page is a function of `GalleryState::view`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::new(GlooTransport, BrowserIdentity, ClientSettings::default());
    let gallery = Gallery::new(api);
    provide_context(gallery);
    gallery.bootstrap();

    let view_kind = Memo::new(move |_| gallery.state.with(|s| s.view()));

    view! {
        <Title text="Photo Albums"/>
        <Toolbar/>
        <main class="gallery">
            {move || match view_kind.get() {
                ViewKind::Albums => view! { <AlbumsPage/> }.into_any(),
                ViewKind::Album => view! { <AlbumPage/> }.into_any(),
                ViewKind::Upload => view! { <UploadPage/> }.into_any(),
                ViewKind::Photo => view! { <PhotoPage/> }.into_any(),
            }}
        </main>
        <NoticeDialog/>
    }
}

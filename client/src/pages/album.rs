//! One album's photos, with admin-only upload and delete actions.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::state::actions::Gallery;
use crate::util::labels::{listing_placeholder, photo_caption};

#[component]
pub fn AlbumPage() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let state = gallery.state;
    let confirm_delete = RwSignal::new(false);

    let title = move || state.with(|s| s.nav.album().map(|a| a.title.clone()).unwrap_or_default());
    let controls = move || state.with(|s| s.controls);
    let placeholder = move || state.with(|s| listing_placeholder(&s.photos, "Loading photos..."));

    let on_delete_confirm = Callback::new(move |()| gallery.delete_album());
    let on_delete_cancel = Callback::new(move |()| confirm_delete.set(false));

    view! {
        <section class="album-page">
            <header class="page-header">
                <button class="btn" on:click=move |_| gallery.back()>
                    "← Albums"
                </button>
                <h1>{title}</h1>
                <Show when=move || controls().upload>
                    <button class="btn btn--primary" on:click=move |_| gallery.start_upload()>
                        "Upload"
                    </button>
                </Show>
                <Show when=move || controls().delete_album>
                    <button class="btn btn--danger" on:click=move |_| confirm_delete.set(true)>
                        "Delete album"
                    </button>
                </Show>
            </header>
            {move || match placeholder() {
                Some(text) => view! { <p class="album-page__status">{text}</p> }.into_any(),
                None => {
                    view! {
                        <div class="album-page__grid">
                            {state
                                .get()
                                .photos
                                .items()
                                .iter()
                                .cloned()
                                .map(|photo| {
                                    let caption = photo_caption(&photo).to_owned();
                                    let src = photo.public_url.clone();
                                    view! {
                                        <button class="photo-tile" on:click=move |_| gallery.open_photo(photo.clone())>
                                            <img class="photo-tile__image" src=src alt=caption.clone()/>
                                            <div class="photo-tile__caption">{caption}</div>
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }
            }}
            <Show when=move || confirm_delete.get()>
                <ConfirmDialog
                    title="Delete Album"
                    message="Delete album?"
                    on_confirm=on_delete_confirm
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

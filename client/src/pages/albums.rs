//! Album list with the admin-only create action.

use gallery::types::Album;
use leptos::prelude::*;

use crate::components::album_card::AlbumCard;
use crate::components::text_dialog::TextDialog;
use crate::state::actions::Gallery;
use crate::util::labels::{SIGNED_OUT_MESSAGE, album_title_input, listing_placeholder};

#[component]
pub fn AlbumsPage() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let state = gallery.state;

    let show_create = RwSignal::new(false);
    let new_title = RwSignal::new(String::new());

    let on_create = move |_| {
        new_title.set(String::new());
        show_create.set(true);
    };
    let on_create_cancel = Callback::new(move |()| show_create.set(false));
    let on_create_submit = Callback::new(move |raw: String| {
        if let Some(title) = album_title_input(&raw) {
            gallery.create_album(title);
        }
    });
    let on_open = Callback::new(move |album: Album| gallery.open_album(album));

    let placeholder = move || state.with(|s| listing_placeholder(&s.albums, "Loading..."));

    view! {
        <section class="albums-page">
            <header class="page-header">
                <h1>"Albums"</h1>
                <Show when=move || state.with(|s| s.controls.create_album)>
                    <button class="btn btn--primary" on:click=on_create>
                        "+ New Album"
                    </button>
                </Show>
            </header>
            <Show
                when=move || state.with(|s| s.signed_in)
                fallback=|| view! { <p class="albums-page__signed-out">{SIGNED_OUT_MESSAGE}</p> }
            >
                {move || match placeholder() {
                    Some(text) => view! { <p class="albums-page__status">{text}</p> }.into_any(),
                    None => {
                        view! {
                            <div class="albums-page__grid">
                                {state
                                    .get()
                                    .albums
                                    .items()
                                    .iter()
                                    .cloned()
                                    .map(|album| view! { <AlbumCard album=album on_open=on_open/> })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Show>
            <Show when=move || show_create.get()>
                <TextDialog
                    title="Create Album"
                    label="Album title"
                    value=new_title
                    submit_label="Create"
                    on_submit=on_create_submit
                    on_cancel=on_create_cancel
                />
            </Show>
        </section>
    }
}

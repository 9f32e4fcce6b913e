//! Card for one album in the album list, with its cover if it has one.

use gallery::types::Album;
use leptos::prelude::*;

#[component]
pub fn AlbumCard(album: Album, on_open: Callback<Album>) -> impl IntoView {
    let title = album.title.clone();
    let description = album.description.clone();
    let cover = album.cover_url.clone();
    let open = move |_| on_open.run(album.clone());

    view! {
        <button class="album-card" on:click=open>
            {match cover {
                Some(url) => view! { <img class="album-card__cover" src=url alt=""/> }.into_any(),
                None => view! { <div class="album-card__cover album-card__cover--empty"></div> }.into_any(),
            }}
            <strong class="album-card__title">{title}</strong>
            <p class="album-card__description">{description}</p>
        </button>
    }
}

//! Top toolbar with the app title and sign-in/sign-out.

use leptos::prelude::*;

use crate::state::actions::Gallery;

#[component]
pub fn Toolbar() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let signed_in = move || gallery.state.with(|s| s.signed_in);

    view! {
        <header class="toolbar">
            <button class="toolbar__title" on:click=move |_| gallery.show_albums()>
                "Photo Albums"
            </button>
            <span class="toolbar__spacer"></span>
            <Show
                when=signed_in
                fallback=move || {
                    view! {
                        <button class="btn btn--primary toolbar__login" on:click=move |_| gallery.sign_in()>
                            "Sign in"
                        </button>
                    }
                }
            >
                <button class="btn toolbar__logout" on:click=move |_| gallery.sign_out()>
                    "Sign out"
                </button>
            </Show>
        </header>
    }
}

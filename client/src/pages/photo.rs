//! Single photo with its description and admin-only edit/delete.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::text_dialog::TextDialog;
use crate::state::actions::Gallery;

#[component]
pub fn PhotoPage() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let state = gallery.state;

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let confirm_delete = RwSignal::new(false);

    let src = move || state.with(|s| s.nav.photo().map(|p| p.public_url.clone()).unwrap_or_default());
    let description = move || state.with(|s| s.nav.photo().map(|p| p.description.clone()).unwrap_or_default());
    let controls = move || state.with(|s| s.controls);

    let on_edit = move |_| {
        draft.set(description());
        editing.set(true);
    };
    let on_edit_submit = Callback::new(move |text: String| gallery.update_description(text));
    let on_edit_cancel = Callback::new(move |()| editing.set(false));
    let on_delete_confirm = Callback::new(move |()| gallery.delete_photo());
    let on_delete_cancel = Callback::new(move |()| confirm_delete.set(false));

    view! {
        <section class="photo-page">
            <header class="page-header">
                <button class="btn" on:click=move |_| gallery.close_photo()>
                    "← Back"
                </button>
                <Show when=move || controls().edit_photo>
                    <button class="btn" on:click=on_edit>
                        "Edit description"
                    </button>
                </Show>
                <Show when=move || controls().delete_photo>
                    <button class="btn btn--danger" on:click=move |_| confirm_delete.set(true)>
                        "Delete photo"
                    </button>
                </Show>
            </header>
            <div class="photo-page__area">
                <img class="photo-page__image" src=src alt=description/>
            </div>
            <p class="photo-page__description">{description}</p>
            <Show when=move || editing.get()>
                <TextDialog
                    title="Photo description"
                    label="Description"
                    value=draft
                    submit_label="Save"
                    allow_empty=true
                    on_submit=on_edit_submit
                    on_cancel=on_edit_cancel
                />
            </Show>
            <Show when=move || confirm_delete.get()>
                <ConfirmDialog
                    title="Delete Photo"
                    message="Sure to delete?"
                    on_confirm=on_delete_confirm
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

//! File picker and progress log for uploading into the current album.
//!
//! The orchestrator runs files strictly one after another; while it runs the
//! start and cancel buttons are disabled and the log grows line by line.

use leptos::prelude::*;

use crate::components::status_log::StatusLog;
use crate::state::actions::Gallery;
use crate::util::labels::{selected_files_summary, upload_button_label};

#[component]
pub fn UploadPage() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let state = gallery.state;
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let selected = RwSignal::new(0_usize);

    let album_title = move || state.with(|s| s.nav.album().map(|a| a.title.clone()).unwrap_or_default());
    let uploading = move || state.with(|s| s.uploading());

    let on_change = move |_| {
        #[cfg(feature = "csr")]
        {
            if let Some(input) = input_ref.get() {
                selected.set(crate::util::files::selected_count(&input));
            }
        }
    };

    let on_start = move |_| {
        #[cfg(feature = "csr")]
        {
            let Some(input) = input_ref.get() else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::files::read_selected(&input).await {
                    Ok(files) => gallery.upload(files),
                    Err(message) => state.update(|s| s.action_failed(&message)),
                }
            });
        }
    };

    view! {
        <section class="upload-page">
            <header class="page-header">
                <h1>"Upload to " {album_title}</h1>
            </header>
            <input
                class="upload-page__files"
                type="file"
                accept="image/*"
                multiple
                node_ref=input_ref
                on:change=on_change
                prop:disabled=uploading
            />
            <p class="upload-page__selected">{move || selected_files_summary(selected.get())}</p>
            <div class="upload-page__actions">
                <button class="btn btn--primary" on:click=on_start prop:disabled=uploading>
                    {move || upload_button_label(uploading())}
                </button>
                <button class="btn" on:click=move |_| gallery.cancel_upload() prop:disabled=uploading>
                    "Cancel"
                </button>
            </div>
            <StatusLog/>
        </section>
    }
}

//! Blocking notice: the user must acknowledge before continuing.

use leptos::prelude::*;

use crate::state::actions::Gallery;

#[component]
pub fn NoticeDialog() -> impl IntoView {
    let gallery = expect_context::<Gallery>();
    let state = gallery.state;

    let message = move || state.with(|s| s.notice.as_ref().map(|n| n.message().to_owned()).unwrap_or_default());
    let is_error = move || state.with(|s| s.notice.as_ref().is_some_and(|n| n.is_error()));

    view! {
        <Show when=move || state.with(|s| s.notice.is_some())>
            <div class="dialog-backdrop">
                <div class="dialog" class:dialog--error=is_error role="alertdialog">
                    <p class="dialog__message">{message}</p>
                    <div class="dialog__actions">
                        <button class="btn btn--primary" on:click=move |_| gallery.acknowledge()>
                            "OK"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

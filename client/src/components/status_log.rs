//! Upload progress lines, oldest first.

use leptos::prelude::*;

use crate::state::actions::Gallery;

#[component]
pub fn StatusLog() -> impl IntoView {
    let state = expect_context::<Gallery>().state;

    view! {
        <div class="status-log" aria-live="polite">
            {move || {
                state
                    .get()
                    .upload_log
                    .into_iter()
                    .map(|line| view! { <div class="status-log__line">{line}</div> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

//! Single-field text dialog (album title, photo description).

use leptos::prelude::*;

/// Modal with one text input. Enter submits; clicking the backdrop cancels.
///
/// With `allow_empty` unset, a blank value keeps the dialog open.
#[component]
pub fn TextDialog(
    title: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    submit_label: &'static str,
    #[prop(optional)] allow_empty: bool,
    on_submit: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let submit = Callback::new(move |()| {
        let text = value.get_untracked();
        if !allow_empty && text.trim().is_empty() {
            return;
        }
        on_submit.run(text);
        on_cancel.run(());
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <label class="dialog__label">
                    {label}
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || value.get()
                        on:input=move |ev| value.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            } else if ev.key() == "Escape" {
                                ev.prevent_default();
                                on_cancel.run(());
                            }
                        }
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        {submit_label}
                    </button>
                </div>
            </div>
        </div>
    }
}

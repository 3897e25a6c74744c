//! Command Bar Component
//!
//! Text input for commands, with the voice button when the browser supports it.

use leptos::prelude::*;

use crate::components::VoiceEntry;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CommandBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let send = move || {
        let text = store.command_input().get_untracked();
        // Blank input is dropped by the session itself
        ctx.submit(text);
    };

    view! {
        <div class="command-bar input-group">
            <input
                id="command-input"
                type="text"
                class="form-control"
                placeholder="Tell me what to do, e.g. \"Add a task to call the bank tomorrow\""
                prop:value=move || store.command_input().get()
                on:input=move |ev| *store.command_input().write() = event_target_value(&ev)
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        send();
                    }
                }
            />
            <button id="send-command" type="button" class="btn btn-primary" on:click=move |_| send()>
                "Send"
            </button>
            {ctx.capabilities.speech_recognition.then(|| view! { <VoiceEntry /> })}
        </div>
    }
}

//! Voice Entry Component
//!
//! Microphone button plus the dictation modal. Only mounted when the browser
//! has speech recognition.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::context::use_app_context;
use crate::store::use_app_store;
use crate::voice::{VoiceController, VoiceState};

#[component]
pub fn VoiceEntry() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let config = expect_context::<ClientConfig>();

    let controller = VoiceController::new(&config.speech_lang, config.voice_submit_delay_ms, store, ctx.session());
    let view_state = controller.view();
    let is_open = controller.is_open();
    let controller = StoredValue::new_local(controller);

    // Release the recognizer if the component goes away mid-dictation
    on_cleanup(move || {
        controller.try_with_value(|c| c.close());
    });

    let toggle_label = move || if view_state.get().is_listening() { "Stop" } else { "Start" };
    let toggle_class = move || {
        if view_state.get().is_listening() {
            "btn btn-danger voice-toggle listening"
        } else {
            "btn btn-primary voice-toggle"
        }
    };
    let status_class = move || match view_state.get().state {
        VoiceState::Error => "voice-status text-danger",
        _ => "voice-status",
    };

    view! {
        <button
            id="voice-button"
            type="button"
            class="btn btn-outline-secondary"
            title="Dictate a command"
            on:click=move |_| controller.with_value(|c| c.open())
        >
            <i class="bi bi-mic"></i>
        </button>

        <Show when=move || is_open.get()>
            <div class="voice-modal-backdrop">
                <div class="voice-modal" role="dialog" aria-label="Voice command">
                    <div class="voice-modal-header">
                        <h5>"Voice command"</h5>
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Close"
                            on:click=move |_| controller.with_value(|c| c.close())
                        ></button>
                    </div>
                    <p class=status_class>{move || view_state.get().status}</p>
                    <p class="voice-transcript">{move || view_state.get().transcript}</p>
                    <button
                        type="button"
                        class=toggle_class
                        disabled=move || view_state.get().state == VoiceState::Finalized
                        on:click=move |_| controller.with_value(|c| c.toggle())
                    >
                        {toggle_label}
                    </button>
                </div>
            </div>
        </Show>
    }
}

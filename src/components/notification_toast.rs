//! Notification Toast Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NotificationToast() -> impl IntoView {
    let notifier = use_app_context().notifier;

    view! {
        {move || notifier.current().map(|note| view! {
            <div
                id="notification-toast"
                class=format!("toast show text-white {}", note.severity.css_class())
                role="status"
                aria-live="polite"
            >
                <div class="d-flex">
                    <div class="toast-body">{note.message}</div>
                    <button
                        type="button"
                        class="btn-close btn-close-white me-2 m-auto"
                        aria-label="Close"
                        on:click=move |_| notifier.close()
                    ></button>
                </div>
            </div>
        })}
    }
}

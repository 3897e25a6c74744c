//! Conversation Panel Component
//!
//! Read-only view of the user/assistant exchange.

use leptos::html::Div;
use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ConversationPanel() -> impl IntoView {
    let store = use_app_store();
    let container = NodeRef::<Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        let _ = store.conversation().with(|log| log.len());
        if let Some(el) = container.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div id="chat-messages" class="chat-messages" node_ref=container>
            <Show when=move || store.conversation().with(|log| log.is_empty())>
                <div class="text-muted small">"Type or say a command to manage your tasks."</div>
            </Show>
            // Entries are append-only, so the index is a stable key
            <For
                each=move || store.conversation().with(|log| log.entries().iter().cloned().enumerate().collect::<Vec<_>>())
                key=|(index, _)| *index
                children=move |(_, entry)| {
                    view! { <div class=entry.role.css_class()>{entry.text}</div> }
                }
            />
        </div>
    }
}

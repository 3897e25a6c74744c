//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ConversationEntry, ConversationLog, TaskFeed};
use crate::notify::{Notifier, Severity};
use crate::session::SessionSink;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Latest task list from the server; the board is derived from it
    pub feed: TaskFeed,
    /// User/assistant exchange for this page session
    pub conversation: ConversationLog,
    /// Command input text (typed or dictated)
    pub command_input: String,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Session writes land in the store; toasts go to the notifier
#[derive(Clone, Copy)]
pub struct StoreSink {
    store: AppStore,
    notifier: Notifier,
}

impl StoreSink {
    pub fn new(store: AppStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }
}

impl SessionSink for StoreSink {
    fn clear_input(&self) {
        self.store.command_input().write().clear();
    }

    fn append_entry(&self, entry: ConversationEntry) {
        self.store.conversation().write().push(entry);
    }

    fn replace_tasks(&self, feed: TaskFeed) {
        *self.store.feed().write() = feed;
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }
}

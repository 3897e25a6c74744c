//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::capabilities::Capabilities;
use crate::notify::Notifier;
use crate::session::CommandSession;
use crate::store::StoreSink;

/// The session wired to the real server and the reactive store
pub type AppSession = CommandSession<HttpTaskApi, StoreSink>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub notifier: Notifier,
    /// Resolved once at startup
    pub capabilities: Capabilities,
    session: StoredValue<Rc<AppSession>, LocalStorage>,
}

impl AppContext {
    pub fn new(notifier: Notifier, capabilities: Capabilities, session: Rc<AppSession>) -> Self {
        Self {
            notifier,
            capabilities,
            session: StoredValue::new_local(session),
        }
    }

    pub fn session(&self) -> Rc<AppSession> {
        self.session.get_value()
    }

    /// Submit a command in the background
    pub fn submit(&self, text: String) {
        let session = self.session();
        spawn_local(async move {
            session.submit(&text).await;
        });
    }

    /// Reload the board from the server
    pub fn reload(&self) {
        let session = self.session();
        spawn_local(async move {
            let _ = session.load_tasks().await;
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

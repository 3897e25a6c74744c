//! Task Board Frontend App
//!
//! Main application component: board on the left, conversation and command
//! entry on the right.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::HttpTaskApi;
use crate::capabilities::Capabilities;
use crate::components::{CommandBar, ConversationPanel, NotificationToast, OverallProgress, TaskBoard};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::notify::Notifier;
use crate::session::CommandSession;
use crate::store::{AppState, StoreSink};

#[component]
pub fn App(config: ClientConfig, capabilities: Capabilities) -> impl IntoView {
    let store = Store::new(AppState::default());
    let notifier = Notifier::new(config.toast_duration_ms);
    let session = Rc::new(CommandSession::new(
        HttpTaskApi::new(&config.api_base),
        StoreSink::new(store, notifier),
    ));
    let ctx = AppContext::new(notifier, capabilities, session);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);
    provide_context(config);

    // Initial board load
    ctx.reload();

    view! {
        <div class="container-fluid app-layout">
            <div class="row">
                <main class="col-lg-7 board-column">
                    <h1>"Task Board"</h1>
                    <OverallProgress />
                    <TaskBoard />
                </main>
                <aside class="col-lg-5 chat-column">
                    <ConversationPanel />
                    <CommandBar />
                </aside>
            </div>
            <NotificationToast />
        </div>
    }
}

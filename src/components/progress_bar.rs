//! Progress Bar Components
//!
//! Per-task bar and the overall progress header.

use leptos::prelude::*;

use crate::aggregate::summarize;
use crate::board::{render_progress_bar, ProgressBarView};
use crate::store::{use_app_store, AppStateStoreFields};

/// Bootstrap-style progress bar at an exact percentage
#[component]
pub fn ProgressBar(
    bar: ProgressBarView,
    #[prop(optional, into)] class: String,
    #[prop(optional)] show_label: bool,
) -> impl IntoView {
    let label = show_label.then(|| bar.label.clone());
    view! {
        <div class=format!("progress {}", class)>
            <div
                class="progress-bar"
                role="progressbar"
                style:width=bar.width
                aria-valuenow=bar.percentage.to_string()
                aria-valuemin="0"
                aria-valuemax="100"
            >
                {label}
            </div>
        </div>
    }
}

/// Aggregate progress of the whole board
#[component]
pub fn OverallProgress() -> impl IntoView {
    let store = use_app_store();
    let summary = Memo::new(move |_| store.feed().with(|feed| summarize(feed.tasks())));

    view! {
        <section class="overall-progress">
            <div class="d-flex justify-content-between mb-1">
                <span>"Overall progress"</span>
                <span class="task-count">
                    {move || {
                        let s = summary.get();
                        format!("{} of {} tasks complete", s.completed, s.total)
                    }}
                </span>
            </div>
            {move || {
                let bar = render_progress_bar(summary.get().overall_progress);
                view! { <ProgressBar bar=bar class="overall" show_label=true /> }
            }}
        </section>
    }
}

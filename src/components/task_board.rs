//! Task Board Component
//!
//! Projects the board view-tree into DOM. The tree is rebuilt from the
//! latest task feed on every change; nothing is patched by hand.

use leptos::prelude::*;

use crate::board::{render_feed, BoardView, CardView, SectionView, EMPTY_PLACEHOLDER, MALFORMED_PLACEHOLDER};
use crate::components::ProgressBar;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskBoard() -> impl IntoView {
    let store = use_app_store();
    let board = Memo::new(move |_| store.feed().with(render_feed));

    view! {
        <div id="task-list" class="task-board">
            {move || match board.get() {
                BoardView::Empty => view! {
                    <div class="alert alert-info board-placeholder">{EMPTY_PLACEHOLDER}</div>
                }.into_any(),
                BoardView::Malformed { reason } => view! {
                    <div class="alert alert-warning board-placeholder" title=reason>{MALFORMED_PLACEHOLDER}</div>
                }.into_any(),
                BoardView::Sections(sections) => sections
                    .into_iter()
                    .map(|section| view! { <TaskSection section=section /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn TaskSection(section: SectionView) -> impl IntoView {
    let class = if section.uncategorized {
        "category-section uncategorized"
    } else {
        "category-section"
    };

    let border_color = section.color.clone();

    view! {
        <section class=class style:border-left-color=border_color>
            <h4 class="category-title">
                <span class="category-swatch" style:background-color=section.color></span>
                {section.title}
            </h4>
            <div class="list-group">
                {section.cards.into_iter().map(|card| view! { <TaskCard card=card /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn TaskCard(card: CardView) -> impl IntoView {
    let class = card.class();

    view! {
        <div class=class data-task-id=card.id>
            <div class="d-flex justify-content-between align-items-center mb-2">
                <h5 class="mb-0">{card.title}</h5>
                <span class="task-due-date">{card.due_label}</span>
            </div>
            <p class="task-estimated-time mb-2">
                <i class="bi bi-clock"></i>" "{card.estimated_time}
            </p>
            <ProgressBar bar=card.progress class="task-progress" />
        </div>
    }
}

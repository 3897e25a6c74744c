//! Board View Model
//!
//! Pure rendering step from grouped tasks to a view-tree. The `TaskBoard`
//! component only projects this tree into DOM nodes.

use crate::aggregate::{group_by_category, BoardGroups};
use crate::models::{Task, TaskFeed, DEFAULT_CATEGORY_COLOR};

pub const UNCATEGORIZED_TITLE: &str = "Uncategorized";
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet. Tell me what you need to get done.";
pub const MALFORMED_PLACEHOLDER: &str = "Tasks could not be displayed: the server sent an unexpected task list.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBarView {
    pub percentage: u8,
    /// CSS width, e.g. "75%"
    pub width: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub due_label: String,
    pub estimated_time: String,
    pub progress: ProgressBarView,
    pub completed: bool,
}

impl CardView {
    pub fn class(&self) -> &'static str {
        if self.completed {
            "list-group-item task-card completed"
        } else {
            "list-group-item task-card"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub color: String,
    pub uncategorized: bool,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    /// No tasks at all
    Empty,
    /// Payload was not a task list
    Malformed { reason: String },
    Sections(Vec<SectionView>),
}

pub fn render_progress_bar(percentage: u8) -> ProgressBarView {
    let text = format!("{}%", percentage);
    ProgressBarView {
        percentage,
        width: text.clone(),
        label: text,
    }
}

fn render_card(task: &Task) -> CardView {
    CardView {
        id: task.id.to_string(),
        title: task.title.clone(),
        due_label: format!("Due: {}", task.due_date),
        estimated_time: task.estimated_time.clone(),
        progress: render_progress_bar(task.progress),
        completed: task.is_completed(),
    }
}

/// One section per category in grouping order, then "Uncategorized" if any
pub fn render_board(groups: &BoardGroups) -> BoardView {
    if groups.is_empty() {
        return BoardView::Empty;
    }

    let mut sections: Vec<SectionView> = groups
        .categories
        .iter()
        .map(|group| SectionView {
            title: group.name.clone(),
            color: group.color.clone(),
            uncategorized: false,
            cards: group.tasks.iter().map(render_card).collect(),
        })
        .collect();

    if !groups.uncategorized.is_empty() {
        sections.push(SectionView {
            title: UNCATEGORIZED_TITLE.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            uncategorized: true,
            cards: groups.uncategorized.iter().map(render_card).collect(),
        });
    }

    BoardView::Sections(sections)
}

/// Render whatever the server sent; a malformed payload becomes a warning
/// placeholder rather than an error.
pub fn render_feed(feed: &TaskFeed) -> BoardView {
    match feed {
        TaskFeed::Tasks(tasks) => render_board(&group_by_category(tasks)),
        TaskFeed::Malformed(reason) => {
            log::warn!("[BOARD] rendering placeholder for malformed task list: {}", reason);
            BoardView::Malformed { reason: reason.clone() }
        }
    }
}

//! UI Components
//!
//! Leptos components for the board, the conversation and command entry.

mod command_bar;
mod conversation_panel;
mod notification_toast;
mod progress_bar;
mod task_board;
mod voice_entry;

pub use command_bar::CommandBar;
pub use conversation_panel::ConversationPanel;
pub use notification_toast::NotificationToast;
pub use progress_bar::{OverallProgress, ProgressBar};
pub use task_board::TaskBoard;
pub use voice_entry::VoiceEntry;

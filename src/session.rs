//! Command Session
//!
//! Runs one user command through the server and reconciles the result into
//! the conversation log and the board. Writes go through a `SessionSink` so
//! the session stays independent of the reactive store.

use std::cell::Cell;

use crate::api::{CommandOutcome, TaskApi};
use crate::error::{CommandRejected, TransportError};
use crate::models::{ConversationEntry, TaskFeed};
use crate::notify::Severity;

pub const REJECTED_REPLY_PREFIX: &str = "I encountered an error: ";
pub const TRANSPORT_FAILURE_REPLY: &str = "I'm sorry, I encountered an error processing your request.";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading tasks";

/// Where session results land
pub trait SessionSink {
    fn clear_input(&self);
    /// Conversation log is append-only
    fn append_entry(&self, entry: ConversationEntry);
    /// Replace the board wholesale
    fn replace_tasks(&self, feed: TaskFeed);
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input, nothing happened
    Ignored,
    Applied,
    Rejected(CommandRejected),
    Failed(TransportError),
}

/// Orchestrates command round-trips.
///
/// Every board-affecting request takes a ticket. A response only replaces
/// the board when its ticket is newer than the last one applied, so a slow
/// response cannot overwrite a board produced by a later submission.
pub struct CommandSession<A, S> {
    api: A,
    sink: S,
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl<A: TaskApi, S: SessionSink> CommandSession<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            issued: Cell::new(0),
            applied: Cell::new(0),
        }
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        ticket
    }

    fn apply_tasks(&self, ticket: u64, feed: TaskFeed) -> bool {
        if ticket <= self.applied.get() {
            log::debug!("[SESSION] dropping stale task list #{} (board is at #{})", ticket, self.applied.get());
            return false;
        }
        self.applied.set(ticket);
        self.sink.replace_tasks(feed);
        true
    }

    /// Initial board load. On failure the board is left as it was and a
    /// danger toast is shown.
    pub async fn load_tasks(&self) -> Result<(), TransportError> {
        let ticket = self.issue_ticket();
        match self.api.fetch_tasks().await {
            Ok(feed) => {
                self.apply_tasks(ticket, feed);
                Ok(())
            }
            Err(e) => {
                log::error!("[SESSION] failed to load tasks: {}", e);
                self.sink.notify(LOAD_ERROR_MESSAGE, Severity::Danger);
                Err(e)
            }
        }
    }

    /// Submit one command. Blank input is ignored without touching the log
    /// or the network.
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let text = raw_text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.sink.append_entry(ConversationEntry::user(text));
        self.sink.clear_input();

        let ticket = self.issue_ticket();
        log::info!("[SESSION] submitting command #{}", ticket);

        match self.api.submit_command(text).await {
            Ok(CommandOutcome::Applied { tasks, message }) => {
                self.apply_tasks(ticket, tasks);
                self.sink.append_entry(ConversationEntry::assistant(message));
                SubmitOutcome::Applied
            }
            Ok(CommandOutcome::Rejected { error }) => {
                log::warn!("[SESSION] command #{} rejected: {}", ticket, error);
                self.sink
                    .append_entry(ConversationEntry::assistant(format!("{}{}", REJECTED_REPLY_PREFIX, error)));
                SubmitOutcome::Rejected(CommandRejected(error))
            }
            Err(e) => {
                log::error!("[SESSION] command #{} failed: {}", ticket, e);
                self.sink.append_entry(ConversationEntry::assistant(TRANSPORT_FAILURE_REPLY));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

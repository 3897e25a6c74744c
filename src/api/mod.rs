//! Task Server API
//!
//! The two requests the client makes against `/api/tasks`, behind a trait so
//! the command session can be driven by a scripted fake in tests.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;
use crate::models::TaskFeed;

pub use http::HttpTaskApi;

pub const TASKS_PATH: &str = "/api/tasks";
const DEFAULT_MESSAGE: &str = "Command processed successfully";
const DEFAULT_ERROR: &str = "Unknown error";

// ========================
// Payloads
// ========================

#[derive(Debug, Serialize)]
pub struct CommandRequest<'a> {
    pub command: &'a str,
}

/// Raw `POST /api/tasks` response body
#[derive(Debug, Deserialize)]
struct CommandEnvelope {
    success: bool,
    #[serde(default)]
    tasks: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Result of a command exchange that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied { tasks: TaskFeed, message: String },
    Rejected { error: String },
}

impl CommandEnvelope {
    fn into_outcome(self) -> CommandOutcome {
        if self.success {
            CommandOutcome::Applied {
                tasks: TaskFeed::from_value(self.tasks),
                message: self.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            }
        } else {
            CommandOutcome::Rejected {
                error: self.error.unwrap_or_else(|| DEFAULT_ERROR.to_string()),
            }
        }
    }
}

/// Decode a task-list body. Invalid JSON is a transport failure; valid JSON
/// of the wrong shape becomes a malformed feed.
pub fn decode_task_list(body: &str) -> Result<TaskFeed, TransportError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    Ok(TaskFeed::from_value(value))
}

/// Decode a `GET /api/tasks` response; any non-2xx status is a failure
pub fn decode_task_response(status: u16, body: &str) -> Result<TaskFeed, TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status(status));
    }
    decode_task_list(body)
}

/// Decode a command response body regardless of HTTP status; the server
/// reports rejected commands with a 500 and a `success: false` envelope.
pub fn decode_command_response(status: u16, body: &str) -> Result<CommandOutcome, TransportError> {
    match serde_json::from_str::<CommandEnvelope>(body) {
        Ok(envelope) => Ok(envelope.into_outcome()),
        Err(_) if !(200..300).contains(&status) => Err(TransportError::Status(status)),
        Err(e) => Err(TransportError::Decode(e.to_string())),
    }
}

// ========================
// Trait
// ========================

/// Single-attempt requests against the task server; no retries.
#[async_trait(?Send)]
pub trait TaskApi {
    /// `GET /api/tasks`
    async fn fetch_tasks(&self) -> Result<TaskFeed, TransportError>;

    /// `POST /api/tasks` with `{command}`; `text` is already trimmed and non-empty
    async fn submit_command(&self, text: &str) -> Result<CommandOutcome, TransportError>;
}

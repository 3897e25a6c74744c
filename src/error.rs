//! Client Error Types
//!
//! Every error here is terminal at the UI boundary: none is retried.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Network or decoding failure talking to the task server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl TransportError {
    pub(crate) fn network(err: JsValue) -> Self {
        TransportError::Network(js_error_text(&err))
    }
}

/// Server understood the request but declined the command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command rejected: {0}")]
pub struct CommandRejected(pub String);

/// Voice capture failure, surfaced only through the voice status text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("speech recognition is not available")]
    Unavailable,
    #[error("could not start recognition: {0}")]
    Start(String),
    #[error("{0}")]
    Recognizer(String),
}

impl RecognitionError {
    /// Short code shown in the voice status line
    pub fn code(&self) -> &str {
        match self {
            RecognitionError::Unavailable => "not-supported",
            RecognitionError::Start(reason) | RecognitionError::Recognizer(reason) => reason,
        }
    }
}

/// Render a thrown JS value as text
pub(crate) fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

//! Browser Capabilities
//!
//! Detected once at startup and passed down to the components that need them.

use crate::voice::browser::recognition_constructor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `SpeechRecognition` or `webkitSpeechRecognition` is present
    pub speech_recognition: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        Self {
            speech_recognition: recognition_constructor().is_some(),
        }
    }
}

//! Client Configuration
//!
//! Resolved once at startup from an optional `window.TASKBOARD_CONFIG`
//! object. Missing fields fall back to defaults.

use std::fmt;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "TASKBOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for `/api/tasks`; empty means same origin
    pub api_base: String,
    /// Pause between a final transcript and its auto-submit
    pub voice_submit_delay_ms: u32,
    /// How long a toast stays up
    pub toast_duration_ms: u32,
    pub speech_lang: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            voice_submit_delay_ms: 1000,
            toast_duration_ms: 5000,
            speech_lang: "en-US".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Read the page-provided config, or defaults if absent or invalid
    pub fn from_window() -> Self {
        Self::resolve(Self::read_window())
    }

    fn read_window() -> Option<Result<Self, serde_wasm_bindgen::Error>> {
        let window = web_sys::window()?;
        match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(raw) if !raw.is_undefined() && !raw.is_null() => Some(serde_wasm_bindgen::from_value(raw)),
            _ => None,
        }
    }

    /// Pick the decoded config, warning when a present config failed to decode
    fn resolve<E: fmt::Display>(decoded: Option<Result<Self, E>>) -> Self {
        match decoded {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("[CONFIG] ignoring invalid {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Unknown level names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

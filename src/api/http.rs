//! Fetch-based TaskApi
//!
//! Talks to the task server through `window.fetch`.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::{decode_command_response, decode_task_response, CommandOutcome, CommandRequest, TaskApi, TASKS_PATH};
use crate::error::TransportError;
use crate::models::TaskFeed;

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    url: String,
}

impl HttpTaskApi {
    /// `api_base` is prefixed to `/api/tasks`; empty means same origin
    pub fn new(api_base: &str) -> Self {
        Self {
            url: format!("{}{}", api_base.trim_end_matches('/'), TASKS_PATH),
        }
    }

    /// Send one request, returning status and body text
    async fn send(&self, method: &str, body: Option<String>) -> Result<(u16, String), TransportError> {
        let init = RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(&self.url, &init).map_err(TransportError::network)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(TransportError::network)?;

        let window = web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(TransportError::network)?
            .dyn_into()
            .map_err(|_| TransportError::Decode("fetch did not return a Response".to_string()))?;

        let text = JsFuture::from(response.text().map_err(TransportError::network)?)
            .await
            .map_err(TransportError::network)?
            .as_string()
            .ok_or_else(|| TransportError::Decode("response body is not text".to_string()))?;

        Ok((response.status(), text))
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn fetch_tasks(&self) -> Result<TaskFeed, TransportError> {
        log::debug!("[HTTP] GET {}", self.url);
        let (status, body) = self.send("GET", None).await?;
        let feed = decode_task_response(status, &body).inspect_err(|e| {
            log::warn!("[HTTP] GET {} failed: {}", self.url, e);
        })?;
        log::info!("[HTTP] loaded {} tasks", feed.tasks().len());
        Ok(feed)
    }

    async fn submit_command(&self, text: &str) -> Result<CommandOutcome, TransportError> {
        let body = serde_json::to_string(&CommandRequest { command: text })
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        log::debug!("[HTTP] POST {} ({} bytes)", self.url, body.len());
        let (status, body) = self.send("POST", Some(body)).await?;
        decode_command_response(status, &body)
    }
}

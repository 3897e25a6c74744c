//! Notification Channel
//!
//! One transient toast at a time. A new message replaces the current one and
//! each message owns its own dismiss timer.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "bg-info",
            Severity::Success => "bg-success",
            Severity::Danger => "bg-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Last-call-wins notification slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationState {
    /// Replace whatever is showing; returns the id the dismiss timer must present
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        self.current = Some(Notification {
            id: self.next_id,
            message: message.into(),
            severity,
        });
        self.next_id
    }

    /// Dismiss only if `id` is still the visible notification
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

/// Reactive handle to the toast, shared through context
#[derive(Clone, Copy)]
pub struct Notifier {
    state: RwSignal<NotificationState>,
    duration_ms: u32,
}

impl Notifier {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            state: RwSignal::new(NotificationState::default()),
            duration_ms,
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        log::debug!("[NOTIFY] toast ({:?}): {}", severity, message);
        let mut id = 0;
        self.state.update(|state| id = state.show(message, severity));

        let state = self.state;
        let duration_ms = self.duration_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            state.update(|state| {
                state.dismiss(id);
            });
        });
    }

    pub fn close(&self) {
        self.state.update(NotificationState::clear);
    }

    pub fn current(&self) -> Option<Notification> {
        self.state.with(|state| state.current().cloned())
    }
}

//! Voice Controller
//!
//! Owns the capture state machine, feeds it browser events and carries out
//! its effects against the store, the timers and the command session.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::browser::{BrowserRecognizerFactory, Dispatch};
use super::{VoiceCapture, VoiceEffect, VoiceEvent, VoiceView};
use crate::context::AppSession;
use crate::store::{AppStateStoreFields, AppStore};

pub struct VoiceController {
    capture: RefCell<VoiceCapture<BrowserRecognizerFactory>>,
    view: RwSignal<VoiceView>,
    open: RwSignal<bool>,
    store: AppStore,
    session: Rc<AppSession>,
}

impl VoiceController {
    pub fn new(lang: &str, submit_delay_ms: u32, store: AppStore, session: Rc<AppSession>) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let dispatch: Dispatch = Rc::new(move |event: VoiceEvent| {
                if let Some(controller) = weak.upgrade() {
                    controller.dispatch(event);
                }
            });
            let factory = BrowserRecognizerFactory::new(lang, dispatch);
            Self {
                capture: RefCell::new(VoiceCapture::new(factory, submit_delay_ms)),
                view: RwSignal::new(VoiceView::default()),
                open: RwSignal::new(false),
                store,
                session,
            }
        })
    }

    pub fn view(&self) -> RwSignal<VoiceView> {
        self.view
    }

    pub fn is_open(&self) -> RwSignal<bool> {
        self.open
    }

    /// Show the capture surface and start listening
    pub fn open(self: &Rc<Self>) {
        self.open.set(true);
        self.dispatch(VoiceEvent::Start);
    }

    /// Start/stop button
    pub fn toggle(self: &Rc<Self>) {
        let event = if self.view.get_untracked().is_listening() {
            VoiceEvent::Stop
        } else {
            VoiceEvent::Start
        };
        self.dispatch(event);
    }

    pub fn close(self: &Rc<Self>) {
        self.dispatch(VoiceEvent::Close);
    }

    pub fn dispatch(self: &Rc<Self>, event: VoiceEvent) {
        let effects = match self.capture.try_borrow_mut() {
            Ok(mut capture) => {
                let effects = capture.handle(event);
                self.view.set(capture.view());
                effects
            }
            Err(_) => {
                // Re-entrant browser callback; retry once the current transition finishes
                let this = self.clone();
                spawn_local(async move { this.dispatch(event) });
                return;
            }
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(self: &Rc<Self>, effect: VoiceEffect) {
        match effect {
            VoiceEffect::SetCommandInput(text) => {
                *self.store.command_input().write() = text;
            }
            VoiceEffect::ScheduleSubmit { generation, delay_ms } => {
                let this = self.clone();
                spawn_local(async move {
                    TimeoutFuture::new(delay_ms).await;
                    this.dispatch(VoiceEvent::DelayElapsed(generation));
                });
            }
            VoiceEffect::Dismiss => self.open.set(false),
            VoiceEffect::Submit(text) => {
                let session = self.session.clone();
                spawn_local(async move {
                    session.submit(&text).await;
                });
            }
        }
    }
}

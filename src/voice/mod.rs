//! Voice Capture
//!
//! Dictation as an explicit state machine. Browser recognizer callbacks are
//! turned into `VoiceEvent`s; each transition returns the `VoiceEffect`s the
//! UI layer must carry out. The recognizer is owned here and only lives while
//! the machine is listening.

pub mod browser;
mod controller;

pub use controller::VoiceController;

use crate::error::RecognitionError;

pub const LISTENING_STATUS: &str = "Listening...";
pub const PROCESSING_STATUS: &str = "Processing command...";
pub const IDLE_STATUS: &str = "Click start and speak your command";

/// A speech recognition session
pub trait Recognizer {
    fn start(&mut self) -> Result<(), RecognitionError>;
    /// Stop listening; dropping the recognizer releases it
    fn stop(&mut self);
}

/// Creates recognizers on demand
pub trait RecognizerFactory {
    type Recognizer: Recognizer;

    fn acquire(&mut self) -> Result<Self::Recognizer, RecognitionError>;
}

/// Best alternative of one recognition result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub is_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
    Finalized,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// User pressed start
    Start,
    /// Recognizer delivered its current result list
    Results(Vec<RecognitionResult>),
    /// Recognizer ended on its own
    End,
    /// Recognizer reported an error code
    Error(String),
    /// User pressed stop
    Stop,
    /// User dismissed the capture surface
    Close,
    /// Finalize delay for the given generation ran out
    DelayElapsed(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEffect {
    SetCommandInput(String),
    /// Deliver `DelayElapsed(generation)` after `delay_ms`
    ScheduleSubmit { generation: u64, delay_ms: u32 },
    /// Hide the capture surface
    Dismiss,
    /// Hand the transcript to the command session
    Submit(String),
}

/// Snapshot for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceView {
    pub state: VoiceState,
    pub transcript: String,
    pub status: String,
}

impl VoiceView {
    pub fn is_listening(&self) -> bool {
        self.state == VoiceState::Listening
    }
}

impl Default for VoiceView {
    fn default() -> Self {
        Self {
            state: VoiceState::Idle,
            transcript: String::new(),
            status: IDLE_STATUS.to_string(),
        }
    }
}

pub struct VoiceCapture<F: RecognizerFactory> {
    factory: F,
    recognizer: Option<F::Recognizer>,
    state: VoiceState,
    transcript: String,
    status: String,
    /// Bumped whenever a pending submit must be invalidated
    generation: u64,
    submit_delay_ms: u32,
}

impl<F: RecognizerFactory> VoiceCapture<F> {
    pub fn new(factory: F, submit_delay_ms: u32) -> Self {
        Self {
            factory,
            recognizer: None,
            state: VoiceState::Idle,
            transcript: String::new(),
            status: IDLE_STATUS.to_string(),
            generation: 0,
            submit_delay_ms,
        }
    }

    pub fn view(&self) -> VoiceView {
        VoiceView {
            state: self.state,
            transcript: self.transcript.clone(),
            status: self.status.clone(),
        }
    }

    pub fn handle(&mut self, event: VoiceEvent) -> Vec<VoiceEffect> {
        match (self.state, event) {
            (VoiceState::Idle | VoiceState::Error, VoiceEvent::Start) => self.start_listening(),
            (VoiceState::Listening, VoiceEvent::Results(results)) => self.on_results(&results),
            (VoiceState::Listening, VoiceEvent::End) => {
                log::debug!("[VOICE] recognizer ended without a final result");
                self.go_idle();
                Vec::new()
            }
            (VoiceState::Idle | VoiceState::Listening, VoiceEvent::Error(code)) => {
                self.fail(RecognitionError::Recognizer(code));
                Vec::new()
            }
            (VoiceState::Listening | VoiceState::Finalized, VoiceEvent::Stop) => {
                // Cancels any pending submit; the transcript is not applied
                self.generation += 1;
                self.go_idle();
                Vec::new()
            }
            (_, VoiceEvent::Close) => {
                self.generation += 1;
                self.go_idle();
                vec![VoiceEffect::Dismiss]
            }
            (VoiceState::Finalized, VoiceEvent::DelayElapsed(generation)) if generation == self.generation => {
                let text = std::mem::take(&mut self.transcript);
                self.state = VoiceState::Idle;
                self.status = IDLE_STATUS.to_string();
                vec![VoiceEffect::Dismiss, VoiceEffect::Submit(text)]
            }
            (state, event) => {
                log::debug!("[VOICE] ignoring {:?} while {:?}", event, state);
                Vec::new()
            }
        }
    }

    fn start_listening(&mut self) -> Vec<VoiceEffect> {
        self.transcript.clear();
        let started = self.factory.acquire().and_then(|mut recognizer| {
            recognizer.start()?;
            Ok(recognizer)
        });
        match started {
            Ok(recognizer) => {
                self.recognizer = Some(recognizer);
                self.state = VoiceState::Listening;
                self.status = LISTENING_STATUS.to_string();
                log::info!("[VOICE] listening");
            }
            Err(e) => self.fail(e),
        }
        Vec::new()
    }

    fn on_results(&mut self, results: &[RecognitionResult]) -> Vec<VoiceEffect> {
        self.transcript = results.iter().map(|r| r.transcript.as_str()).collect();

        if !results.first().is_some_and(|r| r.is_final) {
            return Vec::new();
        }

        self.release();
        self.state = VoiceState::Finalized;
        self.status = PROCESSING_STATUS.to_string();
        self.generation += 1;
        log::info!("[VOICE] final transcript received");
        vec![
            VoiceEffect::SetCommandInput(self.transcript.clone()),
            VoiceEffect::ScheduleSubmit {
                generation: self.generation,
                delay_ms: self.submit_delay_ms,
            },
        ]
    }

    fn go_idle(&mut self) {
        self.release();
        self.state = VoiceState::Idle;
        self.status = IDLE_STATUS.to_string();
    }

    fn fail(&mut self, error: RecognitionError) {
        log::warn!("[VOICE] recognition error: {}", error);
        self.release();
        self.state = VoiceState::Error;
        self.status = format!("Error: {}", error.code());
    }

    fn release(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            recognizer.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Acquire,
        Start,
        Stop,
        Drop,
    }

    struct FakeRecognizer {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_start: bool,
    }

    impl Recognizer for FakeRecognizer {
        fn start(&mut self) -> Result<(), RecognitionError> {
            self.calls.borrow_mut().push(Call::Start);
            if self.fail_start {
                return Err(RecognitionError::Start("not-allowed".into()));
            }
            Ok(())
        }

        fn stop(&mut self) {
            self.calls.borrow_mut().push(Call::Stop);
        }
    }

    impl Drop for FakeRecognizer {
        fn drop(&mut self) {
            self.calls.borrow_mut().push(Call::Drop);
        }
    }

    #[derive(Default)]
    struct FakeFactory {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_start: bool,
    }

    impl RecognizerFactory for FakeFactory {
        type Recognizer = FakeRecognizer;

        fn acquire(&mut self) -> Result<FakeRecognizer, RecognitionError> {
            self.calls.borrow_mut().push(Call::Acquire);
            Ok(FakeRecognizer {
                calls: self.calls.clone(),
                fail_start: self.fail_start,
            })
        }
    }

    fn interim(transcript: &str) -> RecognitionResult {
        RecognitionResult { transcript: transcript.to_string(), is_final: false }
    }

    fn final_(transcript: &str) -> RecognitionResult {
        RecognitionResult { transcript: transcript.to_string(), is_final: true }
    }

    fn capture() -> (VoiceCapture<FakeFactory>, Rc<RefCell<Vec<Call>>>) {
        let factory = FakeFactory::default();
        let calls = factory.calls.clone();
        (VoiceCapture::new(factory, 1000), calls)
    }

    #[test]
    fn test_start_acquires_and_sets_status() {
        let (mut voice, calls) = capture();
        assert_eq!(voice.state, VoiceState::Idle);

        assert!(voice.handle(VoiceEvent::Start).is_empty());

        assert_eq!(voice.state, VoiceState::Listening);
        assert_eq!(voice.status, LISTENING_STATUS);
        assert_eq!(voice.transcript, "");
        assert!(voice.recognizer.is_some());
        assert!(voice.view().is_listening());
        assert_eq!(*calls.borrow(), vec![Call::Acquire, Call::Start]);
    }

    #[test]
    fn test_interim_results_replace_transcript() {
        let (mut voice, _) = capture();
        voice.handle(VoiceEvent::Start);

        voice.handle(VoiceEvent::Results(vec![interim("buy")]));
        assert_eq!(voice.transcript, "buy");

        voice.handle(VoiceEvent::Results(vec![
            interim("buy"),
            interim(" some milk"),
        ]));
        assert_eq!(voice.transcript, "buy some milk");
        assert_eq!(voice.state, VoiceState::Listening);
    }

    #[test]
    fn test_dictation_submits_once_after_delay() {
        let (mut voice, calls) = capture();
        voice.handle(VoiceEvent::Start);
        voice.handle(VoiceEvent::Results(vec![interim("buy")]));

        let effects = voice.handle(VoiceEvent::Results(vec![final_("buy milk")]));
        assert_eq!(
            effects,
            vec![
                VoiceEffect::SetCommandInput("buy milk".into()),
                VoiceEffect::ScheduleSubmit { generation: 1, delay_ms: 1000 },
            ]
        );
        assert_eq!(voice.state, VoiceState::Finalized);
        assert!(!voice.recognizer.is_some());
        assert_eq!(*calls.borrow(), vec![Call::Acquire, Call::Start, Call::Stop, Call::Drop]);

        // Late end from the browser is harmless
        assert!(voice.handle(VoiceEvent::End).is_empty());

        let effects = voice.handle(VoiceEvent::DelayElapsed(1));
        assert_eq!(effects, vec![VoiceEffect::Dismiss, VoiceEffect::Submit("buy milk".into())]);
        assert_eq!(voice.state, VoiceState::Idle);

        // A duplicate timer does not submit again
        assert!(voice.handle(VoiceEvent::DelayElapsed(1)).is_empty());
    }

    #[test]
    fn test_stop_while_listening_releases_without_submit() {
        let (mut voice, calls) = capture();
        voice.handle(VoiceEvent::Start);
        voice.handle(VoiceEvent::Results(vec![interim("delete everything")]));

        assert!(voice.handle(VoiceEvent::Stop).is_empty());

        assert_eq!(voice.state, VoiceState::Idle);
        assert_eq!(voice.status, IDLE_STATUS);
        assert!(!voice.recognizer.is_some());
        assert_eq!(calls.borrow().last(), Some(&Call::Drop));
    }

    #[test]
    fn test_stop_after_final_cancels_pending_submit() {
        let (mut voice, _) = capture();
        voice.handle(VoiceEvent::Start);
        voice.handle(VoiceEvent::Results(vec![final_("buy milk")]));

        voice.handle(VoiceEvent::Stop);

        assert_eq!(voice.state, VoiceState::Idle);
        assert!(voice.handle(VoiceEvent::DelayElapsed(1)).is_empty());
    }

    #[test]
    fn test_natural_end_returns_to_idle() {
        let (mut voice, _) = capture();
        voice.handle(VoiceEvent::Start);
        voice.handle(VoiceEvent::End);

        assert_eq!(voice.state, VoiceState::Idle);
        assert!(!voice.recognizer.is_some());
    }

    #[test]
    fn test_recognizer_error_moves_to_error_and_releases() {
        let (mut voice, calls) = capture();
        voice.handle(VoiceEvent::Start);

        voice.handle(VoiceEvent::Error("no-speech".into()));

        assert_eq!(voice.state, VoiceState::Error);
        assert_eq!(voice.status, "Error: no-speech");
        assert!(!voice.recognizer.is_some());
        assert!(!voice.view().is_listening());
        assert_eq!(calls.borrow().last(), Some(&Call::Drop));

        // Retry from error
        voice.handle(VoiceEvent::Start);
        assert_eq!(voice.state, VoiceState::Listening);
    }

    #[test]
    fn test_start_failure_is_an_error() {
        let factory = FakeFactory { fail_start: true, ..Default::default() };
        let calls = factory.calls.clone();
        let mut voice = VoiceCapture::new(factory, 1000);

        voice.handle(VoiceEvent::Start);

        assert_eq!(voice.state, VoiceState::Error);
        assert_eq!(voice.status, "Error: not-allowed");
        assert!(!voice.recognizer.is_some());
        assert_eq!(*calls.borrow(), vec![Call::Acquire, Call::Start, Call::Drop]);
    }

    #[test]
    fn test_close_dismisses_from_any_state() {
        let (mut voice, _) = capture();
        voice.handle(VoiceEvent::Start);
        voice.handle(VoiceEvent::Results(vec![final_("buy milk")]));

        assert_eq!(voice.handle(VoiceEvent::Close), vec![VoiceEffect::Dismiss]);
        assert_eq!(voice.state, VoiceState::Idle);
        assert!(voice.handle(VoiceEvent::DelayElapsed(1)).is_empty());
    }

    #[test]
    fn test_results_ignored_when_not_listening() {
        let (mut voice, _) = capture();
        assert!(voice.handle(VoiceEvent::Results(vec![final_("hi")])).is_empty());
        assert_eq!(voice.state, VoiceState::Idle);
        assert_eq!(voice.transcript, "");
    }
}

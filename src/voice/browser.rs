//! Browser Speech Recognition
//!
//! Bindings to the Web Speech API (`SpeechRecognition`, or the prefixed
//! `webkitSpeechRecognition`) and their translation into `VoiceEvent`s.

use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use super::{RecognitionResult, Recognizer, RecognizerFactory, VoiceEvent};
use crate::error::{js_error_text, RecognitionError};

const CONSTRUCTOR_NAMES: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

#[wasm_bindgen]
extern "C" {
    /// A `SpeechRecognition` instance
    pub type SpeechRecognition;

    #[wasm_bindgen(method, setter = continuous)]
    fn set_continuous(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter = interimResults)]
    fn set_interim_results(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter = lang)]
    fn set_lang(this: &SpeechRecognition, value: &str);

    #[wasm_bindgen(method, setter = onresult)]
    fn set_onresult(this: &SpeechRecognition, handler: Option<&Function>);

    #[wasm_bindgen(method, setter = onerror)]
    fn set_onerror(this: &SpeechRecognition, handler: Option<&Function>);

    #[wasm_bindgen(method, setter = onend)]
    fn set_onend(this: &SpeechRecognition, handler: Option<&Function>);

    #[wasm_bindgen(method, catch, js_name = start)]
    fn start_recognition(this: &SpeechRecognition) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = abort)]
    fn abort_recognition(this: &SpeechRecognition);
}

/// The recognition constructor, if this browser has one
pub fn recognition_constructor() -> Option<Function> {
    let window = web_sys::window()?;
    CONSTRUCTOR_NAMES.iter().find_map(|name| {
        Reflect::get(&window, &JsValue::from_str(name))
            .ok()
            .filter(JsValue::is_function)
            .map(|constructor| constructor.unchecked_into::<Function>())
    })
}

/// Read `event.results` into best-alternative results, in order
fn read_results(event: &JsValue) -> Vec<RecognitionResult> {
    let Ok(results) = Reflect::get(event, &JsValue::from_str("results")) else {
        return Vec::new();
    };
    let length = Reflect::get(&results, &JsValue::from_str("length"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;

    (0..length)
        .filter_map(|i| Reflect::get_u32(&results, i).ok())
        .map(|result| {
            let is_final = Reflect::get(&result, &JsValue::from_str("isFinal"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let transcript = Reflect::get_u32(&result, 0)
                .and_then(|best| Reflect::get(&best, &JsValue::from_str("transcript")))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            RecognitionResult { transcript, is_final }
        })
        .collect()
}

fn read_error_code(event: &JsValue) -> String {
    Reflect::get(event, &JsValue::from_str("error"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Event callback into the voice controller
pub type Dispatch = Rc<dyn Fn(VoiceEvent)>;

/// One live recognition session; event handlers are detached on drop
pub struct BrowserRecognizer {
    inner: SpeechRecognition,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

impl Recognizer for BrowserRecognizer {
    fn start(&mut self) -> Result<(), RecognitionError> {
        self.inner
            .start_recognition()
            .map_err(|e| RecognitionError::Start(js_error_text(&e)))
    }

    fn stop(&mut self) {
        self.inner.abort_recognition();
    }
}

impl Drop for BrowserRecognizer {
    fn drop(&mut self) {
        self.inner.set_onresult(None);
        self.inner.set_onerror(None);
        self.inner.set_onend(None);
    }
}

pub struct BrowserRecognizerFactory {
    lang: String,
    dispatch: Dispatch,
}

impl BrowserRecognizerFactory {
    pub fn new(lang: impl Into<String>, dispatch: Dispatch) -> Self {
        Self { lang: lang.into(), dispatch }
    }
}

impl RecognizerFactory for BrowserRecognizerFactory {
    type Recognizer = BrowserRecognizer;

    fn acquire(&mut self) -> Result<BrowserRecognizer, RecognitionError> {
        let constructor = recognition_constructor().ok_or(RecognitionError::Unavailable)?;
        let inner: SpeechRecognition = Reflect::construct(&constructor, &Array::new())
            .map_err(|e| RecognitionError::Start(js_error_text(&e)))?
            .unchecked_into();

        inner.set_continuous(false);
        inner.set_interim_results(true);
        inner.set_lang(&self.lang);

        let dispatch = self.dispatch.clone();
        let on_result = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            dispatch(VoiceEvent::Results(read_results(&event)));
        });
        let dispatch = self.dispatch.clone();
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            dispatch(VoiceEvent::Error(read_error_code(&event)));
        });
        let dispatch = self.dispatch.clone();
        let on_end = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            dispatch(VoiceEvent::End);
        });

        inner.set_onresult(Some(on_result.as_ref().unchecked_ref()));
        inner.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        inner.set_onend(Some(on_end.as_ref().unchecked_ref()));

        Ok(BrowserRecognizer {
            inner,
            _on_result: on_result,
            _on_error: on_error,
            _on_end: on_end,
        })
    }
}

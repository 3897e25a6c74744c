//! Task Board Frontend Entry Point

mod aggregate;
mod api;
mod app;
mod board;
mod capabilities;
mod components;
mod config;
mod context;
mod error;
mod models;
mod notify;
mod session;
mod store;
mod voice;

use app::App;
use capabilities::Capabilities;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    // Install the logger before reading config so its warnings reach the console
    console_log::init_with_level(log::Level::Trace).ok();
    let config = ClientConfig::from_window();
    log::set_max_level(config.level_filter());

    let capabilities = Capabilities::detect();
    log::info!("[APP] starting (speech recognition: {})", capabilities.speech_recognition);

    mount_to_body(move || view! { <App config=config capabilities=capabilities /> });
}

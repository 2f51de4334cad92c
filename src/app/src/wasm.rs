//! WebAssembly FFI bindings for the Crux Core
//!
//! `static/portal.js` loads this module. Events go in as JSON, and every call
//! returns a JSON array of [`ShellRequest`](crate::shell::ShellRequest)s for
//! the page to carry out.

use std::sync::Mutex;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::events::Event;
use crate::shell::{Shell, ShellRequest};

lazy_static! {
    static ref SHELL: Mutex<Shell> = Mutex::new(Shell::default());
}

fn with_shell<T>(f: impl FnOnce(&mut Shell) -> Result<T, String>) -> Result<T, String> {
    let mut shell = SHELL
        .lock()
        .map_err(|_| "core lock poisoned".to_string())?;
    f(&mut shell)
}

fn to_json(requests: Vec<ShellRequest>) -> Result<String, String> {
    serde_json::to_string(&requests).map_err(|e| format!("failed to serialize effects: {e}"))
}

/// Runs automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    // a second init (module reloaded) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Process an Event given as JSON, e.g. `{"Scan":"Start"}`.
#[wasm_bindgen]
pub fn process_event(event_json: &str) -> Result<String, String> {
    let event: Event =
        serde_json::from_str(event_json).map_err(|e| format!("invalid event: {e}"))?;
    with_shell(|shell| to_json(shell.process_event(event)))
}

/// Current ViewModel as JSON.
#[wasm_bindgen]
pub fn view() -> Result<String, String> {
    with_shell(|shell| {
        serde_json::to_string(&shell.view()).map_err(|e| format!("failed to serialize view: {e}"))
    })
}

/// The delay with `id` ran out.
#[wasm_bindgen]
pub fn resolve_delay(id: u32) -> Result<String, String> {
    with_shell(|shell| to_json(shell.resolve_delay(id)?))
}

/// `fetch` for request `id` completed with `status`.
#[wasm_bindgen]
pub fn resolve_http(id: u32, status: u16, body: &[u8]) -> Result<String, String> {
    with_shell(|shell| to_json(shell.resolve_http(id, status, body.to_vec())?))
}

/// `fetch` for request `id` rejected.
#[wasm_bindgen]
pub fn fail_http(id: u32, message: String) -> Result<String, String> {
    with_shell(|shell| to_json(shell.fail_http(id, message)?))
}

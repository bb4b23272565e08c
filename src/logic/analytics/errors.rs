//! Error Hooks
//!
//! Forwards uncaught runtime failures to the emitter as `runtime_error`
//! events. Observability only: nothing here is ever surfaced to the user,
//! and there is no dedup or rate limiting, so an error storm produces one
//! event per error.

use serde_json::{Map, Value};

use super::emitter::Emitter;
use super::event::EVENT_RUNTIME_ERROR;

/// Report a runtime error as an analytics event
pub fn report_error(emitter: &Emitter, message: &str, source: Option<&str>, line: Option<u32>) {
    let mut params = Map::new();
    params.insert("error_message".to_string(), Value::from(message));
    params.insert(
        "error_source".to_string(),
        source.map(Value::from).unwrap_or(Value::Null),
    );
    params.insert(
        "error_line".to_string(),
        line.map(Value::from).unwrap_or(Value::Null),
    );
    emitter.emit(EVENT_RUNTIME_ERROR, params);
}

/// Report a failed background task (the unhandled-rejection analog)
pub fn report_task_error(emitter: &Emitter, reason: &str) {
    report_error(emitter, &format!("Unhandled task error: {}", reason), None, None);
}

/// Install a global panic hook that forwards panic messages to the
/// emitter, then delegates to the previously installed hook. Panics keep
/// their original behavior; the hook only observes.
pub fn install_panic_hook(emitter: Emitter) {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        let (source, line) = match info.location() {
            Some(loc) => (Some(loc.file().to_string()), Some(loc.line())),
            None => (None, None),
        };

        report_error(&emitter, &message, source.as_deref(), line);
        log::error!("Uncaught panic: {}", message);

        previous(info);
    }));
}

// ============================================================================
// TESTS
// ============================================================================

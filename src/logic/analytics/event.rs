//! Analytics Event Types
//!
//! Immutable, timestamped engagement events. Every event carries the
//! per-process session id and the device context it was emitted under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::logic::config::DeviceType;

// ============================================================================
// EVENT NAMES
// ============================================================================

pub const EVENT_PAGE_LOAD: &str = "page_load";
pub const EVENT_PAGE_VIEW: &str = "page_view";
pub const EVENT_NAVIGATION: &str = "navigation";
pub const EVENT_FILE_DOWNLOAD: &str = "file_download";
pub const EVENT_FORM_SUBMIT: &str = "form_submit";
pub const EVENT_MODAL_OPEN: &str = "modal_open";
pub const EVENT_MODAL_CLOSE: &str = "modal_close";
pub const EVENT_BUTTON_CLICK: &str = "button_click";
pub const EVENT_FEATURE_USAGE: &str = "feature_usage";
pub const EVENT_RAGE_CLICK: &str = "rage_click";
pub const EVENT_QUICK_BACK: &str = "quick_back";
pub const EVENT_RUNTIME_ERROR: &str = "runtime_error";

// ============================================================================
// ANALYTICS EVENT
// ============================================================================

/// Immutable engagement event
///
/// Events are append-only and never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Unique event ID
    pub id: String,
    /// When the event was emitted (UTC)
    pub timestamp: DateTime<Utc>,
    /// Event name (e.g. `scroll_depth_50`, `rage_click`)
    pub name: String,
    /// Session ID (for correlating events in the same run)
    pub session_id: String,
    /// Device type the event was emitted from
    pub device_type: DeviceType,
    /// Whether the client runs as an installed PWA
    pub is_pwa: bool,
    /// Free-form event parameters
    pub params: Map<String, Value>,
}

impl AnalyticsEvent {
    /// Create a new event with empty params
    pub fn new(name: &str, device_type: DeviceType, is_pwa: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            name: name.to_string(),
            session_id: get_session_id(),
            device_type,
            is_pwa,
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// Convert to a single JSONL line
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Look up a parameter by key
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

// ============================================================================
// SESSION ID
// ============================================================================

use std::sync::OnceLock;

static SESSION_ID: OnceLock<String> = OnceLock::new();

/// Get the current session ID (generated once per process)
pub fn get_session_id() -> String {
    SESSION_ID
        .get_or_init(|| Uuid::new_v4().to_string())
        .clone()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = AnalyticsEvent::new(EVENT_PAGE_LOAD, DeviceType::Desktop, false);
        assert!(!event.id.is_empty());
        assert_eq!(event.name, "page_load");
        assert!(event.params.is_empty());
    }

    #[test]
    fn test_event_params() {
        let event = AnalyticsEvent::new(EVENT_QUICK_BACK, DeviceType::Mobile, true)
            .with_param("duration_ms", 4200)
            .with_param("page", "home");

        assert_eq!(event.param("duration_ms"), Some(&Value::from(4200)));
        assert_eq!(event.param("page"), Some(&Value::from("home")));
        assert!(event.is_pwa);
    }

    #[test]
    fn test_event_to_jsonl() {
        let event = AnalyticsEvent::new(EVENT_RAGE_CLICK, DeviceType::Desktop, false)
            .with_param("click_count", 3);
        let jsonl = event.to_jsonl();
        assert!(jsonl.contains("rage_click"));
        assert!(!jsonl.contains('\n')); // JSONL = single line
    }

    #[test]
    fn test_session_id_consistency() {
        let id1 = get_session_id();
        let id2 = get_session_id();
        assert_eq!(id1, id2); // Same process = same ID
    }
}

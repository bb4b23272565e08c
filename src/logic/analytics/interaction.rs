//! Interaction Heuristics
//!
//! Rage-click detection (click bursts on the same element) and quick-back
//! detection (leaving the page unusually soon after load).

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use super::emitter::Emitter;
use super::event::{EVENT_QUICK_BACK, EVENT_RAGE_CLICK};

/// Maximum gap between clicks counted as one burst (ms)
pub const RAGE_CLICK_WINDOW_MS: i64 = 1000;

/// Clicks in a burst before it counts as rage
pub const RAGE_CLICK_COUNT: u32 = 3;

/// Class attribute is truncated to this many chars in the event
const CLASS_TRUNCATE_LEN: usize = 100;

/// Dwell time under which an unload counts as a quick back (ms)
pub const QUICK_BACK_THRESHOLD_MS: i64 = 10_000;

// ============================================================================
// CLICK TARGET
// ============================================================================

/// The element a click landed on. `element` is a stable identity handle:
/// two clicks hit the same element iff their handles are equal.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ClickTarget {
    pub element: u64,
    pub tag: String,
    pub class: Option<String>,
    pub id: Option<String>,
}

impl ClickTarget {
    pub fn new(element: u64, tag: &str) -> Self {
        Self {
            element,
            tag: tag.to_string(),
            class: None,
            id: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

// ============================================================================
// RAGE CLICK
// ============================================================================

/// Click-burst state. Count resets to 1 whenever the target changes or the
/// gap since the previous click exceeds the window; at `RAGE_CLICK_COUNT`
/// one event is emitted and the count resets to 0, so a six-click burst
/// emits twice.
#[derive(Debug, Default)]
pub struct RageClickDetector {
    last_element: Option<u64>,
    last_click_ms: i64,
    count: u32,
}

impl RageClickDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(&mut self, target: &ClickTarget, now: DateTime<Utc>, emitter: &Emitter) {
        let now_ms = now.timestamp_millis();

        if self.last_element != Some(target.element)
            || now_ms - self.last_click_ms > RAGE_CLICK_WINDOW_MS
        {
            self.count = 1;
            self.last_element = Some(target.element);
        } else {
            self.count += 1;
        }

        self.last_click_ms = now_ms;

        if self.count >= RAGE_CLICK_COUNT {
            emitter.emit(EVENT_RAGE_CLICK, rage_params(target, self.count));
            self.count = 0;
        }
    }
}

fn rage_params(target: &ClickTarget, count: u32) -> Map<String, Value> {
    let truncated_class = target
        .class
        .as_deref()
        .map(|c| c.chars().take(CLASS_TRUNCATE_LEN).collect::<String>());

    match json!({
        "target_tag": target.tag,
        "target_class": truncated_class,
        "target_id": target.id,
        "click_count": count,
    }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// ============================================================================
// QUICK BACK
// ============================================================================

/// Detects exits happening soon after page load. The load instant is
/// captured once at setup and never refreshed per view, so this measures
/// total session dwell, not per-view dwell.
#[derive(Debug)]
pub struct QuickBackTracker {
    page_load: DateTime<Utc>,
}

impl QuickBackTracker {
    pub fn new(page_load: DateTime<Utc>) -> Self {
        Self { page_load }
    }

    pub fn on_unload(&self, now: DateTime<Utc>, emitter: &Emitter) {
        let duration_ms = now.timestamp_millis() - self.page_load.timestamp_millis();
        if duration_ms < QUICK_BACK_THRESHOLD_MS {
            let mut params = Map::new();
            params.insert("duration_ms".to_string(), Value::from(duration_ms));
            emitter.emit(EVENT_QUICK_BACK, params);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

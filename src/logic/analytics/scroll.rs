//! Scroll Depth Tracker
//!
//! One-shot events at 25/50/75/100% scroll depth. Depth is tracked per
//! view: the shell resets the flags on every view change, which is
//! deliberately asymmetric with the session-lifetime engagement timers.

use super::emitter::Emitter;

/// Scroll-depth checkpoints (percent)
pub const SCROLL_THRESHOLDS: [u32; 4] = [25, 50, 75, 100];

/// Client viewport geometry at the moment of a scroll event
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct ScrollPosition {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// One-shot flags per scroll-depth threshold
#[derive(Debug, Default)]
pub struct ScrollTracker {
    fired: [bool; SCROLL_THRESHOLDS.len()],
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a scroll event. Short pages (non-positive scrollable range)
    /// are a no-op.
    pub fn on_scroll(&mut self, pos: ScrollPosition, emitter: &Emitter) {
        let scrollable = pos.scroll_height - pos.viewport_height;
        if scrollable <= 0.0 {
            return;
        }

        let percent = (pos.scroll_y / scrollable * 100.0).round() as i64;

        for (i, &threshold) in SCROLL_THRESHOLDS.iter().enumerate() {
            if percent >= threshold as i64 && !self.fired[i] {
                self.fired[i] = true;
                emitter.emit_simple(&format!("scroll_depth_{}", threshold));
            }
        }
    }

    /// Clear all flags; called on every view change
    pub fn reset(&mut self) {
        self.fired = [false; SCROLL_THRESHOLDS.len()];
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::analytics::emitter::{MemorySink, ReportingSink};
    use crate::logic::config::{AnalyticsConfig, DeviceContext};
    use std::sync::Arc;

    fn test_emitter() -> (Emitter, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let emitter = Emitter::new(
            AnalyticsConfig::new(Some("G-TEST".to_string())),
            DeviceContext::new("Mozilla/5.0 (X11; Linux x86_64)", false),
            Some(sink.clone() as Arc<dyn ReportingSink>),
        );
        (emitter, sink)
    }

    /// Page of 2000px content in a 1000px viewport: scrollable range 1000px
    fn at(scroll_y: f64) -> ScrollPosition {
        ScrollPosition {
            scroll_y,
            scroll_height: 2000.0,
            viewport_height: 1000.0,
        }
    }

    #[test]
    fn test_thresholds_fire_once_per_view() {
        let (emitter, sink) = test_emitter();
        let mut tracker = ScrollTracker::new();

        // 80% -> back to 30% -> 80% again
        tracker.on_scroll(at(800.0), &emitter);
        tracker.on_scroll(at(300.0), &emitter);
        tracker.on_scroll(at(800.0), &emitter);

        assert_eq!(
            sink.names(),
            vec!["scroll_depth_25", "scroll_depth_50", "scroll_depth_75"]
        );
    }

    #[test]
    fn test_full_depth() {
        let (emitter, sink) = test_emitter();
        let mut tracker = ScrollTracker::new();

        tracker.on_scroll(at(1000.0), &emitter);
        assert_eq!(sink.len(), 4);
        assert_eq!(sink.names().last().map(String::as_str), Some("scroll_depth_100"));
    }

    #[test]
    fn test_short_page_is_noop() {
        let (emitter, sink) = test_emitter();
        let mut tracker = ScrollTracker::new();

        tracker.on_scroll(
            ScrollPosition {
                scroll_y: 50.0,
                scroll_height: 800.0,
                viewport_height: 1000.0,
            },
            &emitter,
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_reset_allows_refire() {
        let (emitter, sink) = test_emitter();
        let mut tracker = ScrollTracker::new();

        tracker.on_scroll(at(300.0), &emitter);
        assert_eq!(sink.len(), 1);

        tracker.reset();
        tracker.on_scroll(at(300.0), &emitter);
        assert_eq!(sink.names(), vec!["scroll_depth_25", "scroll_depth_25"]);
    }
}

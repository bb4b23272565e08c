//! Application Shell
//!
//! Owns every piece of mutable tracking state (engagement poller, scroll
//! flags, click-burst counters, quick-back epoch) and the current view.
//! Handlers receive state explicitly through this object instead of
//! free-floating module globals, so teardown and tests stay clean.
//!
//! Reset scopes are asymmetric on purpose: scroll-depth flags reset on
//! every view change, engagement flags and the quick-back epoch live for
//! the whole session.

use chrono::{DateTime, Utc};

use super::analytics::{
    errors, start_engagement_tracking, ClickTarget, Emitter, EngagementHandle,
    NavigationMethod, QuickBackTracker, RageClickDetector, ScrollPosition, ScrollTracker,
};
use super::analytics::event::EVENT_PAGE_LOAD;
use super::content::ViewState;

/// The single-page application shell
pub struct AppShell {
    emitter: Emitter,
    engagement: Option<EngagementHandle>,
    scroll: ScrollTracker,
    rage_clicks: RageClickDetector,
    quick_back: QuickBackTracker,
    view: ViewState,
}

impl AppShell {
    /// Create the shell. The quick-back epoch is captured here and never
    /// refreshed per view.
    pub fn new(emitter: Emitter) -> Self {
        Self {
            emitter,
            engagement: None,
            scroll: ScrollTracker::new(),
            rage_clicks: RageClickDetector::new(),
            quick_back: QuickBackTracker::new(Utc::now()),
            view: ViewState::Home,
        }
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Install the process-wide trackers and record the initial page view.
    /// Runs once at application start; requires a tokio runtime for the
    /// engagement poller.
    pub fn start(&mut self) {
        self.emitter.emit_simple(EVENT_PAGE_LOAD);
        errors::install_panic_hook(self.emitter.clone());

        if self.engagement.is_none() {
            self.engagement = Some(start_engagement_tracking(self.emitter.clone()));
        }

        self.emitter.track_page_view(self.view.title(), &self.view.path());
        log::info!("Shell started on {}", self.view.name());
    }

    /// Switch views. Emits `page_view` and `navigation` and resets the
    /// per-view scroll flags. Navigating to the current view is a no-op.
    pub fn navigate(&mut self, to: ViewState, method: NavigationMethod) {
        if to == self.view {
            return;
        }

        self.emitter.track_page_view(to.title(), &to.path());
        self.emitter.track_navigation(self.view.name(), to.name(), method);

        // Scroll depth is per-view; engagement flags deliberately are not
        self.scroll.reset();
        self.view = to;
    }

    pub fn on_scroll(&mut self, pos: ScrollPosition) {
        self.scroll.on_scroll(pos, &self.emitter);
    }

    pub fn on_click(&mut self, target: &ClickTarget, now: DateTime<Utc>) {
        self.rage_clicks.on_click(target, now, &self.emitter);
    }

    /// Page is being left; run quick-back detection
    pub fn on_unload(&self, now: DateTime<Utc>) {
        self.quick_back.on_unload(now, &self.emitter);
    }

    /// Stop the engagement poller. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.engagement.take() {
            handle.cancel();
            log::info!("Shell torn down");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

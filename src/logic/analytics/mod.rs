//! Analytics Module
//!
//! Client-side engagement instrumentation:
//! - `event` - the event model (names, params, session id)
//! - `emitter` - gating, enrichment, delivery to a reporting sink
//! - `engagement` - one-shot elapsed-time thresholds (session-lifetime)
//! - `scroll` - one-shot scroll-depth thresholds (per-view)
//! - `interaction` - rage-click and quick-back heuristics
//! - `errors` - panic hook and task-error forwarding
//!
//! All delivery is fire-and-forget and at-most-once; every failure mode is
//! a silent no-op so instrumentation can never break the page.

pub mod emitter;
pub mod engagement;
pub mod errors;
pub mod event;
pub mod interaction;
pub mod scroll;

pub use emitter::{Emitter, JsonlSink, MemorySink, NavigationMethod, NullSink, ReportingSink};
pub use engagement::{start_engagement_tracking, EngagementHandle, EngagementTimers};
pub use errors::{install_panic_hook, report_error, report_task_error};
pub use event::{get_session_id, AnalyticsEvent};
pub use interaction::{ClickTarget, QuickBackTracker, RageClickDetector};
pub use scroll::{ScrollPosition, ScrollTracker};

//! Event Emitter
//!
//! Gates, enriches and forwards engagement events to a reporting sink.
//! Fire-and-forget: at most one delivery per call, no retry, no buffering,
//! and every failure mode is a silent no-op (analytics must never break
//! the page).

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Timelike, Utc};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};

use super::event::{self, AnalyticsEvent};
use crate::logic::config::{AnalyticsConfig, DeviceContext, TrackingSwitch};

// ============================================================================
// REPORTING SINK
// ============================================================================

/// Destination for delivered events (the "gtag" seam)
pub trait ReportingSink: Send + Sync {
    fn report(&self, event: &AnalyticsEvent);
}

/// Sink that drops everything
pub struct NullSink;

impl ReportingSink for NullSink {
    fn report(&self, _event: &AnalyticsEvent) {}
}

/// Sink that buffers events in memory, for inspection and tests
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    /// Names of buffered events, in emission order
    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ReportingSink for MemorySink {
    fn report(&self, event: &AnalyticsEvent) {
        self.events.lock().push(event.clone());
    }
}

// ============================================================================
// JSONL SINK
// ============================================================================

/// Maximum file size before rotation (5 MB)
const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Log file extension
const LOG_EXT: &str = ".jsonl";

struct JsonlInner {
    writer: BufWriter<File>,
    current_file: PathBuf,
    current_size: u64,
    base_dir: PathBuf,
}

/// Append-only JSONL sink with size-based rotation
pub struct JsonlSink {
    inner: Mutex<JsonlInner>,
}

impl JsonlSink {
    /// Create a new sink writing under the given directory
    pub fn new(base_dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&base_dir)?;
        let (file_path, file) = Self::open_new_file(&base_dir)?;

        Ok(Self {
            inner: Mutex::new(JsonlInner {
                writer: BufWriter::new(file),
                current_file: file_path,
                current_size: 0,
                base_dir,
            }),
        })
    }

    /// Open a new log file with timestamp
    fn open_new_file(base_dir: &PathBuf) -> std::io::Result<(PathBuf, File)> {
        let now = Utc::now();
        let filename = format!(
            "events_{}_{:02}_{:02}_{:02}{:02}{:02}{}",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            LOG_EXT
        );
        let file_path = base_dir.join(&filename);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        log::info!("Opened analytics log: {:?}", file_path);
        Ok((file_path, file))
    }

    fn write(&self, event: &AnalyticsEvent) -> std::io::Result<()> {
        let line = event.to_jsonl();
        let bytes = line.as_bytes();
        let mut inner = self.inner.lock();

        if inner.current_size + bytes.len() as u64 > MAX_FILE_SIZE {
            inner.writer.flush()?;
            let (new_path, new_file) = Self::open_new_file(&inner.base_dir)?;
            log::info!("Rotated from {:?} to {:?}", inner.current_file, new_path);
            inner.writer = BufWriter::new(new_file);
            inner.current_file = new_path;
            inner.current_size = 0;
        }

        inner.writer.write_all(bytes)?;
        inner.writer.write_all(b"\n")?;
        inner.current_size += bytes.len() as u64 + 1;
        inner.writer.flush()
    }

    pub fn current_file(&self) -> PathBuf {
        self.inner.lock().current_file.clone()
    }
}

impl ReportingSink for JsonlSink {
    fn report(&self, event: &AnalyticsEvent) {
        if let Err(e) = self.write(event) {
            log::warn!("Failed to record analytics event: {}", e);
        }
    }
}

/// Read all events back from a JSONL log file
pub fn read_events(file_path: &PathBuf) -> std::io::Result<Vec<AnalyticsEvent>> {
    use std::io::{BufRead, BufReader};

    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            if let Ok(event) = serde_json::from_str::<AnalyticsEvent>(&line) {
                events.push(event);
            }
        }
    }

    Ok(events)
}

// ============================================================================
// NAVIGATION METHOD
// ============================================================================

/// How the user moved between views
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMethod {
    Sidebar,
    Button,
    Link,
}

impl NavigationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationMethod::Sidebar => "sidebar",
            NavigationMethod::Button => "button",
            NavigationMethod::Link => "link",
        }
    }
}

// ============================================================================
// EMITTER
// ============================================================================

struct EmitterInner {
    config: AnalyticsConfig,
    device: DeviceContext,
    sink: Option<Arc<dyn ReportingSink>>,
}

/// Gating, enriching event emitter. Cheap to clone.
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<EmitterInner>,
}

impl Emitter {
    pub fn new(
        config: AnalyticsConfig,
        device: DeviceContext,
        sink: Option<Arc<dyn ReportingSink>>,
    ) -> Self {
        if !config.is_configured() {
            log::warn!("Measurement id not set - analytics disabled");
        }

        Self {
            inner: Arc::new(EmitterInner {
                config,
                device,
                sink,
            }),
        }
    }

    /// An emitter that never delivers anything
    pub fn disabled() -> Self {
        Self::new(AnalyticsConfig::new(None), DeviceContext::default(), None)
    }

    /// Emit a single event. Silently discards when tracking is switched
    /// off, the measurement id is missing, no sink is attached, or the
    /// user agent matches the bot pattern.
    pub fn emit(&self, name: &str, params: Map<String, Value>) {
        let inner = &self.inner;

        if !TrackingSwitch::is_enabled() {
            return;
        }
        if !inner.config.is_configured() {
            return;
        }
        if inner.device.is_bot(&inner.config) {
            return;
        }
        let Some(sink) = inner.sink.as_ref() else {
            return;
        };

        let event = AnalyticsEvent::new(name, inner.device.device_type(), inner.device.is_pwa())
            .with_params(params);

        sink.report(&event);

        if inner.config.debug {
            log::debug!("[analytics] {}: {:?}", event.name, event.params);
        }
    }

    /// Emit with no parameters
    pub fn emit_simple(&self, name: &str) {
        self.emit(name, Map::new());
    }

    // ------------------------------------------------------------------
    // Typed wrappers
    // ------------------------------------------------------------------

    pub fn track_page_view(&self, page_title: &str, page_path: &str) {
        self.emit(
            event::EVENT_PAGE_VIEW,
            object(json!({
                "page_title": page_title,
                "page_path": page_path,
            })),
        );
    }

    pub fn track_navigation(&self, from: &str, to: &str, method: NavigationMethod) {
        self.emit(
            event::EVENT_NAVIGATION,
            object(json!({
                "event_category": "navigation",
                "from_page": from,
                "to_page": to,
                "navigation_method": method.as_str(),
            })),
        );
    }

    pub fn track_file_download(&self, file_name: &str, file_type: &str, category: Option<&str>) {
        let mut params = object(json!({
            "event_category": "file_download",
            "file_name": file_name,
            "file_type": file_type,
        }));
        if let Some(category) = category {
            params.insert("content_category".to_string(), Value::from(category));
        }
        self.emit(event::EVENT_FILE_DOWNLOAD, params);
    }

    pub fn track_form_submission(&self, form_name: &str, fields: Map<String, Value>) {
        let mut params = object(json!({
            "event_category": "form_submission",
            "form_name": form_name,
        }));
        params.extend(fields);
        self.emit(event::EVENT_FORM_SUBMIT, params);
    }

    pub fn track_modal_open(&self, modal_name: &str, modal_type: Option<&str>) {
        self.emit(
            event::EVENT_MODAL_OPEN,
            object(json!({
                "event_category": "modal",
                "modal_name": modal_name,
                "modal_type": modal_type.unwrap_or("dialog"),
            })),
        );
    }

    pub fn track_modal_close(&self, modal_name: &str) {
        self.emit(
            event::EVENT_MODAL_CLOSE,
            object(json!({
                "event_category": "modal",
                "modal_name": modal_name,
            })),
        );
    }

    pub fn track_button_click(&self, button_name: &str, extra: Map<String, Value>) {
        let mut params = object(json!({ "button_name": button_name }));
        params.extend(extra);
        self.emit(event::EVENT_BUTTON_CLICK, params);
    }

    pub fn track_feature_usage(&self, feature_name: &str, extra: Map<String, Value>) {
        let mut params = object(json!({ "feature_name": feature_name }));
        params.extend(extra);
        self.emit(event::EVENT_FEATURE_USAGE, params);
    }

    /// Generic escape hatch for one-off events
    pub fn track_event(&self, name: &str, params: Map<String, Value>) {
        self.emit(name, params);
    }
}

/// Extract the object out of a `json!({..})` literal
fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

    fn test_emitter(user_agent: &str) -> (Emitter, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let emitter = Emitter::new(
            AnalyticsConfig::new(Some("G-TEST".to_string())),
            DeviceContext::new(user_agent, false),
            Some(sink.clone() as Arc<dyn ReportingSink>),
        );
        (emitter, sink)
    }

    #[test]
    fn test_emit_enriches_device_context() {
        let (emitter, sink) = test_emitter("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)");
        emitter.emit_simple("page_load");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].device_type.as_str(), "mobile");
        assert!(!events[0].is_pwa);
    }

    #[test]
    fn test_bot_never_reports() {
        let (emitter, sink) = test_emitter("Googlebot/2.1");

        emitter.emit_simple("page_load");
        emitter.track_page_view("Home", "/home");
        emitter.track_button_click("subscribe", Map::new());

        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_measurement_id_discards() {
        let sink = Arc::new(MemorySink::new());
        let emitter = Emitter::new(
            AnalyticsConfig::new(None),
            DeviceContext::new(DESKTOP_UA, false),
            Some(sink.clone() as Arc<dyn ReportingSink>),
        );

        emitter.emit_simple("page_load");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_navigation_params() {
        let (emitter, sink) = test_emitter(DESKTOP_UA);
        emitter.track_navigation("Home", "Participants", NavigationMethod::Sidebar);

        let events = sink.events();
        assert_eq!(events[0].name, "navigation");
        assert_eq!(
            events[0].param("navigation_method"),
            Some(&Value::from("sidebar"))
        );
        assert_eq!(events[0].param("to_page"), Some(&Value::from("Participants")));
    }

    #[test]
    fn test_jsonl_sink_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(JsonlSink::new(temp_dir.path().to_path_buf()).unwrap());
        let emitter = Emitter::new(
            AnalyticsConfig::new(Some("G-TEST".to_string())),
            DeviceContext::new(DESKTOP_UA, false),
            Some(sink.clone() as Arc<dyn ReportingSink>),
        );

        emitter.track_page_view("Home", "/home");
        emitter.emit_simple("page_load");

        let events = read_events(&sink.current_file()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "page_view");
    }
}

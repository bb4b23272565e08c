//! Analytics Configuration
//!
//! Everything the trackers need to know about their environment is carried
//! in explicit structs constructed once at startup and passed in, rather
//! than looked up ambiently. The only global here is the kill-switch.

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants;

// ============================================================================
// KILL-SWITCH
// ============================================================================

// Default state: tracking on. Flipping this silences every emitter.
static TRACKING_ENABLED: AtomicBool = AtomicBool::new(true);

pub struct TrackingSwitch;

impl TrackingSwitch {
    pub fn is_enabled() -> bool {
        TRACKING_ENABLED.load(Ordering::Relaxed)
    }

    pub fn set_enabled(val: bool) {
        TRACKING_ENABLED.store(val, Ordering::Relaxed);
    }
}

// ============================================================================
// PATTERNS
// ============================================================================

/// Known bot/crawler user-agent fragments
pub const DEFAULT_BOT_PATTERN: &str =
    r"(?i)bot|crawl|spider|slurp|facebookexternalhit|Twitterbot|Slackbot|Discordbot|WhatsApp|Telegram|LinkedInBot";

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)iPhone|iPad|iPod|Android").expect("valid mobile pattern"));

// ============================================================================
// ANALYTICS CONFIG
// ============================================================================

/// Injected analytics configuration
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Measurement/site identifier; analytics is fully inert without it
    pub measurement_id: Option<String>,

    /// Log each delivered event at debug level
    pub debug: bool,

    /// User agents matching this pattern never produce events
    pub bot_pattern: Regex,
}

impl AnalyticsConfig {
    pub fn new(measurement_id: Option<String>) -> Self {
        Self {
            measurement_id,
            debug: false,
            bot_pattern: Regex::new(DEFAULT_BOT_PATTERN).expect("valid bot pattern"),
        }
    }

    /// Build from the recognized environment keys (see `constants`)
    pub fn from_env() -> Self {
        let mut config = Self::new(constants::get_measurement_id());
        config.debug = constants::is_analytics_debug();

        if let Some(pattern) = constants::get_optional(constants::ENV_BOT_PATTERN) {
            match Regex::new(&pattern) {
                Ok(re) => config.bot_pattern = re,
                Err(e) => log::warn!("Invalid {}: {}", constants::ENV_BOT_PATTERN, e),
            }
        }

        config
    }

    /// Analytics only activates with a configured identifier
    pub fn is_configured(&self) -> bool {
        self.measurement_id.is_some()
    }
}

// ============================================================================
// DEVICE CONTEXT
// ============================================================================

/// Device type derived from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Desktop => "desktop",
        }
    }
}

/// What the client runtime reports about itself. Captured once at startup.
#[derive(Debug, Clone)]
pub struct DeviceContext {
    pub user_agent: String,

    /// Running in standalone display mode (installed PWA)
    pub standalone_display: bool,
}

impl DeviceContext {
    pub fn new(user_agent: impl Into<String>, standalone_display: bool) -> Self {
        Self {
            user_agent: user_agent.into(),
            standalone_display,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        if MOBILE_PATTERN.is_match(&self.user_agent) {
            DeviceType::Mobile
        } else {
            DeviceType::Desktop
        }
    }

    pub fn is_pwa(&self) -> bool {
        self.standalone_display
    }

    pub fn is_bot(&self, config: &AnalyticsConfig) -> bool {
        config.bot_pattern.is_match(&self.user_agent)
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self::new("", false)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_detection() {
        let mobile = DeviceContext::new(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
            false,
        );
        assert_eq!(mobile.device_type(), DeviceType::Mobile);

        let android = DeviceContext::new("Mozilla/5.0 (Linux; android 14)", false);
        assert_eq!(android.device_type(), DeviceType::Mobile);

        let desktop = DeviceContext::new("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", false);
        assert_eq!(desktop.device_type(), DeviceType::Desktop);
    }

    #[test]
    fn test_bot_detection() {
        let config = AnalyticsConfig::new(Some("G-TEST".to_string()));

        let crawler = DeviceContext::new("Googlebot/2.1 (+http://www.google.com/bot.html)", false);
        assert!(crawler.is_bot(&config));

        let slack = DeviceContext::new("Slackbot-LinkExpanding 1.0", false);
        assert!(slack.is_bot(&config));

        let human = DeviceContext::new("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)", false);
        assert!(!human.is_bot(&config));
    }

    #[test]
    fn test_unconfigured_analytics() {
        let config = AnalyticsConfig::new(None);
        assert!(!config.is_configured());
    }
}

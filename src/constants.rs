//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every externally configured identifier (analytics measurement id,
//! Formbricks ids, video API credentials) is read here and nowhere else.

/// Default Formbricks host
///
/// This is the fallback URL when no environment variable is set.
pub const DEFAULT_FORMBRICKS_HOST: &str = "https://app.formbricks.com";

/// Default HTTP timeout for outbound requests (seconds)
pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;

/// Engagement poll interval (seconds) - coarser than the thresholds,
/// so reported elapsed time carries up to this much jitter
pub const ENGAGEMENT_POLL_INTERVAL: u64 = 5;

/// Video cache freshness window (seconds) - 6 hours
pub const VIDEO_CACHE_MAX_AGE: i64 = 6 * 60 * 60;

/// Maximum videos fetched per listing call
pub const VIDEO_PAGE_SIZE: u32 = 20;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Oskar Fischer Prize Site";

// ============================================
// Recognized environment keys
// ============================================

pub const ENV_MEASUREMENT_ID: &str = "GA_MEASUREMENT_ID";
pub const ENV_ANALYTICS_DEBUG: &str = "ANALYTICS_DEBUG";
pub const ENV_BOT_PATTERN: &str = "ANALYTICS_BOT_PATTERN";
pub const ENV_FORMBRICKS_HOST: &str = "FORMBRICKS_HOST";
pub const ENV_FORMBRICKS_ENV_ID: &str = "FORMBRICKS_ENV_ID";
pub const ENV_FORMBRICKS_SURVEY_ID: &str = "FORMBRICKS_SURVEY_ID";
pub const ENV_FORMBRICKS_EMAIL_QUESTION_ID: &str = "FORMBRICKS_EMAIL_QUESTION_ID";
pub const ENV_FORMBRICKS_SEGMENT_QUESTION_ID: &str = "FORMBRICKS_SEGMENT_QUESTION_ID";
pub const ENV_VIDEO_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_VIDEO_CHANNEL_ID: &str = "YOUTUBE_CHANNEL_ID";
pub const ENV_VIDEO_API_URL: &str = "VIDEO_API_URL";
pub const ENV_USER_AGENT: &str = "CLIENT_USER_AGENT";

/// Default video search endpoint
pub const DEFAULT_VIDEO_API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the analytics measurement id, if configured
pub fn get_measurement_id() -> Option<String> {
    std::env::var(ENV_MEASUREMENT_ID).ok().filter(|s| !s.is_empty())
}

/// Check whether analytics debug logging is on. Unset and empty both
/// count as off.
pub fn is_analytics_debug() -> bool {
    get_optional(ENV_ANALYTICS_DEBUG)
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(false)
}

/// Get Formbricks host from environment or use default
pub fn get_formbricks_host() -> String {
    std::env::var(ENV_FORMBRICKS_HOST)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FORMBRICKS_HOST.to_string())
}

/// Get an optional identifier from the environment
pub fn get_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Get the video search endpoint from environment or use default
pub fn get_video_api_url() -> String {
    std::env::var(ENV_VIDEO_API_URL)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_VIDEO_API_URL.to_string())
}

// ============================================
// Tests
// ============================================

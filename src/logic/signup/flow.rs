//! Signup Flow
//!
//! Validates an email, checks the local duplicate cache, and posts the
//! signup to the configured Formbricks survey endpoint. First failure wins;
//! nothing is accumulated. Duplicate protection is local-only and
//! non-authoritative.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants;

use super::store::{AudienceSegment, SignupRecord, SignupSource, SignupStore};
use super::validate::validate_email;

// ============================================================================
// CONFIG
// ============================================================================

/// Formbricks endpoint configuration
#[derive(Debug, Clone)]
pub struct FormbricksConfig {
    pub host: String,
    pub environment_id: Option<String>,
    pub survey_id: Option<String>,
    pub email_question_id: Option<String>,
    pub segment_question_id: Option<String>,
    pub timeout_seconds: u64,
}

impl FormbricksConfig {
    /// Build from the recognized environment keys (see `constants`)
    pub fn from_env() -> Self {
        Self {
            host: constants::get_formbricks_host(),
            environment_id: constants::get_optional(constants::ENV_FORMBRICKS_ENV_ID),
            survey_id: constants::get_optional(constants::ENV_FORMBRICKS_SURVEY_ID),
            email_question_id: constants::get_optional(constants::ENV_FORMBRICKS_EMAIL_QUESTION_ID),
            segment_question_id: constants::get_optional(
                constants::ENV_FORMBRICKS_SEGMENT_QUESTION_ID,
            ),
            timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// An unconfigured endpoint, for environments without signup
    pub fn unconfigured() -> Self {
        Self {
            host: constants::DEFAULT_FORMBRICKS_HOST.to_string(),
            environment_id: None,
            survey_id: None,
            email_question_id: None,
            segment_question_id: None,
            timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// All four identifiers are required before anything is sent
    fn ids(&self) -> Option<(&str, &str, &str, &str)> {
        Some((
            self.environment_id.as_deref()?,
            self.survey_id.as_deref()?,
            self.email_question_id.as_deref()?,
            self.segment_question_id.as_deref()?,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.ids().is_some()
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct ResponsePayload {
    #[serde(rename = "surveyId")]
    survey_id: String,
    finished: bool,
    data: Map<String, Value>,
    meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
struct ResponseMeta {
    source: SignupSource,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    message: Option<String>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Signup failure taxonomy. User input errors recover locally; config and
/// transport errors surface a generic message and leave the user free to
/// retry by resubmitting.
#[derive(Debug, Clone)]
pub enum SignupError {
    EmptyEmail,
    InvalidEmail,
    AlreadySubscribed,
    NotConfigured,
    Server(Option<String>),
    Network(String),
}

impl SignupError {
    /// The inline text shown next to the form
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyEmail => "Please enter your email address.".to_string(),
            Self::InvalidEmail => "Please enter a valid email address.".to_string(),
            Self::AlreadySubscribed => "This email is already subscribed.".to_string(),
            Self::NotConfigured => {
                "Email signup is not configured. Please try again later.".to_string()
            }
            Self::Server(message) => message
                .clone()
                .unwrap_or_else(|| "Failed to subscribe. Please try again.".to_string()),
            Self::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "empty email"),
            Self::InvalidEmail => write!(f, "invalid email"),
            Self::AlreadySubscribed => write!(f, "already subscribed"),
            Self::NotConfigured => write!(f, "signup endpoint not configured"),
            Self::Server(message) => {
                write!(f, "server rejected signup: {}", message.as_deref().unwrap_or("-"))
            }
            Self::Network(e) => write!(f, "network error: {}", e),
        }
    }
}

impl std::error::Error for SignupError {}

// ============================================================================
// FLOW
// ============================================================================

/// Email signup flow with observable state
pub struct EmailSignup {
    config: FormbricksConfig,
    store: SignupStore,
    http_client: reqwest::Client,
    is_loading: bool,
    is_success: bool,
    error: Option<String>,
}

impl EmailSignup {
    pub fn new(config: FormbricksConfig, store_dir: Option<PathBuf>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            store: SignupStore::new(store_dir),
            http_client,
            is_loading: false,
            is_success: false,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear all observable state
    pub fn reset(&mut self) {
        self.is_loading = false;
        self.is_success = false;
        self.error = None;
    }

    /// Submit a signup. Returns true on success; on failure the reason is
    /// available through `error()`. Taking `&mut self` keeps one form
    /// instance from racing itself; nothing prevents two instances from
    /// double-submitting (no server-side idempotency).
    pub async fn submit(
        &mut self,
        email: &str,
        audience_segment: AudienceSegment,
        source: SignupSource,
    ) -> bool {
        self.error = None;
        self.is_success = false;
        self.is_loading = true;

        match self.try_submit(email, audience_segment, source).await {
            Ok(()) => {
                self.is_success = true;
                self.is_loading = false;
                true
            }
            Err(e) => {
                if matches!(e, SignupError::NotConfigured) {
                    log::warn!("Formbricks not configured - set the FORMBRICKS_* env vars");
                } else {
                    log::debug!("Signup rejected: {}", e);
                }
                self.error = Some(e.user_message());
                self.is_loading = false;
                false
            }
        }
    }

    async fn try_submit(
        &self,
        email: &str,
        audience_segment: AudienceSegment,
        source: SignupSource,
    ) -> Result<(), SignupError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(SignupError::EmptyEmail);
        }
        if !validate_email(trimmed) {
            return Err(SignupError::InvalidEmail);
        }
        if self.store.contains(trimmed) {
            return Err(SignupError::AlreadySubscribed);
        }

        let (env_id, survey_id, email_qid, segment_qid) =
            self.config.ids().ok_or(SignupError::NotConfigured)?;

        let record = SignupRecord {
            email: trimmed.to_lowercase(),
            audience_segment,
            timestamp: Utc::now(),
            source,
        };

        let mut data = Map::new();
        data.insert(email_qid.to_string(), Value::from(record.email.clone()));
        data.insert(
            segment_qid.to_string(),
            Value::from(record.audience_segment.as_str()),
        );

        let payload = ResponsePayload {
            survey_id: survey_id.to_string(),
            finished: true,
            data,
            meta: ResponseMeta {
                source: record.source,
                timestamp: record.timestamp,
            },
        };

        let url = format!("{}/api/v1/client/{}/responses", self.config.host, env_id);

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SignupError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .json::<ServerErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(SignupError::Server(message));
        }

        // Local cache write is best-effort; success stands either way
        self.store.append(record);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &SignupStore {
        &self.store
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn configured() -> FormbricksConfig {
        FormbricksConfig {
            host: "https://forms.invalid".to_string(),
            environment_id: Some("env_1".to_string()),
            survey_id: Some("svy_1".to_string()),
            email_question_id: Some("q_email".to_string()),
            segment_question_id: Some("q_segment".to_string()),
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_empty_email() {
        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(configured(), Some(temp_dir.path().to_path_buf()));

        let ok = flow.submit("   ", AudienceSegment::General, SignupSource::Home).await;

        assert!(!ok);
        assert!(!flow.is_success());
        assert!(!flow.is_loading());
        assert_eq!(flow.error(), Some("Please enter your email address."));
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(configured(), Some(temp_dir.path().to_path_buf()));

        let ok = flow.submit("not-an-email", AudienceSegment::General, SignupSource::Home).await;

        assert!(!ok);
        assert_eq!(flow.error(), Some("Please enter a valid email address."));
    }

    #[tokio::test]
    async fn test_duplicate_rejected_before_network() {
        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(configured(), Some(temp_dir.path().to_path_buf()));

        // Pre-seed the cache; host is unreachable, so reaching the network
        // would fail with a different message.
        flow.store().append(SignupRecord {
            email: "user@example.com".to_string(),
            audience_segment: AudienceSegment::General,
            timestamp: Utc::now(),
            source: SignupSource::About,
        });

        let ok = flow
            .submit("USER@example.com", AudienceSegment::General, SignupSource::Footer)
            .await;

        assert!(!ok);
        assert_eq!(flow.error(), Some("This email is already subscribed."));
        assert_eq!(flow.store().load().len(), 1); // no duplicate written
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(
            FormbricksConfig::unconfigured(),
            Some(temp_dir.path().to_path_buf()),
        );

        let ok = flow
            .submit("a@b.com", AudienceSegment::Researcher, SignupSource::Footer)
            .await;

        assert!(!ok);
        assert_eq!(
            flow.error(),
            Some("Email signup is not configured. Please try again later.")
        );
        assert!(flow.store().load().is_empty());
    }

    /// Answer one HTTP request with 200 OK and an empty JSON body
    fn one_shot_ok_server() -> (String, std::thread::JoinHandle<()>) {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: application/json\r\n\
                      Content-Length: 2\r\n\
                      Connection: close\r\n\r\n{}",
                )
                .unwrap();
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_successful_submit_caches_lowercased_record() {
        let (host, server) = one_shot_ok_server();
        let mut config = configured();
        config.host = host;

        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(config, Some(temp_dir.path().to_path_buf()));

        let ok = flow
            .submit("A@B.com", AudienceSegment::Researcher, SignupSource::Footer)
            .await;
        server.join().unwrap();

        assert!(ok);
        assert!(flow.is_success());
        assert!(!flow.is_loading());
        assert!(flow.error().is_none());

        let records = flow.store().load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "a@b.com");
        assert_eq!(records[0].audience_segment, AudienceSegment::Researcher);
        assert_eq!(records[0].source, SignupSource::Footer);
    }

    #[tokio::test]
    async fn test_reset_clears_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut flow = EmailSignup::new(configured(), Some(temp_dir.path().to_path_buf()));

        flow.submit("", AudienceSegment::General, SignupSource::Home).await;
        assert!(flow.error().is_some());

        flow.reset();
        assert!(flow.error().is_none());
        assert!(!flow.is_success());
        assert!(!flow.is_loading());
    }

    #[test]
    fn test_payload_wire_shape() {
        let mut data = Map::new();
        data.insert("q_email".to_string(), Value::from("a@b.com"));
        data.insert("q_segment".to_string(), Value::from("researcher"));

        let payload = ResponsePayload {
            survey_id: "svy_1".to_string(),
            finished: true,
            data,
            meta: ResponseMeta {
                source: SignupSource::Footer,
                timestamp: Utc::now(),
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["surveyId"], "svy_1");
        assert_eq!(json["finished"], true);
        assert_eq!(json["data"]["q_email"], "a@b.com");
        assert_eq!(json["meta"]["source"], "footer");
        assert!(json["meta"]["timestamp"].is_string());
    }
}

//! Local Signup Cache
//!
//! Append-only JSON array of signup records under the local data dir.
//! This cache is the only duplicate protection the system has; it is a UX
//! nicety, not a correctness guarantee (cleared storage or another browser
//! bypasses it). Records are never mutated or deleted and never expire.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

/// Who the subscriber says they are
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudienceSegment {
    #[serde(rename = "researcher")]
    Researcher,
    #[serde(rename = "pharma")]
    Pharma,
    #[serde(rename = "healthcare")]
    Healthcare,
    #[serde(rename = "investor")]
    Investor,
    #[serde(rename = "patient_caregiver")]
    PatientCaregiver,
    #[serde(rename = "patient_advocate")]
    PatientAdvocate,
    #[serde(rename = "general")]
    General,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl AudienceSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceSegment::Researcher => "researcher",
            AudienceSegment::Pharma => "pharma",
            AudienceSegment::Healthcare => "healthcare",
            AudienceSegment::Investor => "investor",
            AudienceSegment::PatientCaregiver => "patient_caregiver",
            AudienceSegment::PatientAdvocate => "patient_advocate",
            AudienceSegment::General => "general",
            AudienceSegment::Unspecified => "",
        }
    }
}

/// Which part of the site the signup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupSource {
    About,
    Footer,
    Home,
}

impl SignupSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupSource::About => "about",
            SignupSource::Footer => "footer",
            SignupSource::Home => "home",
        }
    }
}

/// One successful signup. Email is stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRecord {
    pub email: String,
    pub audience_segment: AudienceSegment,
    pub timestamp: DateTime<Utc>,
    pub source: SignupSource,
}

// ============================================================================
// STORE
// ============================================================================

const STORE_FILE: &str = "email_signups.json";

/// Append-only signup record store
pub struct SignupStore {
    file_path: PathBuf,
}

impl SignupStore {
    /// Create a store under the given directory, or the default local data
    /// dir when `None`.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        let dir = base_dir.unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fischer-prize")
        });

        fs::create_dir_all(&dir).ok();

        Self {
            file_path: dir.join(STORE_FILE),
        }
    }

    /// Load all stored records; empty on any read or parse failure
    pub fn load(&self) -> Vec<SignupRecord> {
        let Ok(content) = fs::read_to_string(&self.file_path) else {
            return Vec::new();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Append a record, best-effort. A full or unavailable store is logged
    /// and otherwise ignored.
    pub fn append(&self, record: SignupRecord) {
        let mut records = self.load();
        records.push(record);

        let result = serde_json::to_string(&records)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .and_then(|json| fs::write(&self.file_path, json));

        if let Err(e) = result {
            log::warn!("Failed to cache signup locally: {}", e);
        }
    }

    /// Case-insensitive duplicate check against previously cached records
    pub fn contains(&self, email: &str) -> bool {
        let needle = email.to_lowercase();
        self.load().iter().any(|r| r.email.to_lowercase() == needle)
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(email: &str) -> SignupRecord {
        SignupRecord {
            email: email.to_string(),
            audience_segment: AudienceSegment::Researcher,
            timestamp: Utc::now(),
            source: SignupSource::Footer,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = SignupStore::new(Some(temp_dir.path().to_path_buf()));
        assert!(store.load().is_empty());
        assert!(!store.contains("a@b.com"));
    }

    #[test]
    fn test_append_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = SignupStore::new(Some(temp_dir.path().to_path_buf()));

        store.append(record("a@b.com"));
        store.append(record("c@d.com"));

        let records = store.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "a@b.com");
        assert_eq!(records[1].source, SignupSource::Footer);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let store = SignupStore::new(Some(temp_dir.path().to_path_buf()));

        store.append(record("user@example.com"));

        assert!(store.contains("USER@EXAMPLE.COM"));
        assert!(store.contains("user@example.com"));
        assert!(!store.contains("other@example.com"));
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = SignupStore::new(Some(temp_dir.path().to_path_buf()));
        fs::write(store.file_path(), "not json").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_segment_wire_names() {
        assert_eq!(
            serde_json::to_string(&AudienceSegment::PatientCaregiver).unwrap(),
            "\"patient_caregiver\""
        );
        assert_eq!(serde_json::to_string(&AudienceSegment::Unspecified).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&SignupSource::About).unwrap(), "\"about\"");
    }
}

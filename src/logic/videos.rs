//! Video Listing Client
//!
//! Fetches the channel's videos from a paginated search API (20 items per
//! call), normalizes them into `VideoItem`s, and caches the result in a
//! local file with a 6-hour freshness window. A fresh cache short-circuits
//! the network entirely; cache failures are never fatal.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants;

// ============================================================================
// TYPES
// ============================================================================

/// Uniform video shape the views render from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail: String,
}

/// On-disk cache entry
#[derive(Debug, Serialize, Deserialize)]
struct VideoCache {
    data: Vec<VideoItem>,
    /// Unix timestamp of the fetch (seconds)
    timestamp: i64,
}

// Search API response shape
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    title: String,
    description: String,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
    thumbnails: SearchThumbnails,
}

#[derive(Debug, Deserialize)]
struct SearchThumbnails {
    medium: SearchThumbnail,
}

#[derive(Debug, Deserialize)]
struct SearchThumbnail {
    url: String,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone)]
pub enum VideoError {
    Network(String),
    Server(u16),
    Parse(String),
}

impl std::fmt::Display for VideoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Server(code) => write!(f, "Server error: {}", code),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for VideoError {}

// ============================================================================
// ENTITY DECODING
// ============================================================================

static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#39|#x27|apos);").expect("valid entity pattern"));

/// Decode the HTML entities the listing API escapes titles with
pub fn decode_html_entities(text: &str) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &regex::Captures| match &caps[0] {
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            "&#39;" | "&#x27;" | "&apos;" => "'",
            // The pattern only matches the entities above
            _ => "",
        })
        .into_owned()
}

// ============================================================================
// CLIENT
// ============================================================================

const CACHE_FILE: &str = "videos_cache.json";

/// Video listing client with a local file cache
pub struct VideoClient {
    api_url: String,
    api_key: Option<String>,
    channel_id: Option<String>,
    cache_path: PathBuf,
    http_client: reqwest::Client,
}

impl VideoClient {
    pub fn new(
        api_key: Option<String>,
        channel_id: Option<String>,
        cache_dir: Option<PathBuf>,
    ) -> Self {
        let dir = cache_dir.unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fischer-prize")
        });
        fs::create_dir_all(&dir).ok();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(constants::DEFAULT_HTTP_TIMEOUT))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: constants::get_video_api_url(),
            api_key,
            channel_id,
            cache_path: dir.join(CACHE_FILE),
            http_client,
        }
    }

    /// Build from the recognized environment keys (see `constants`)
    pub fn from_env() -> Self {
        Self::new(
            constants::get_optional(constants::ENV_VIDEO_API_KEY),
            constants::get_optional(constants::ENV_VIDEO_CHANNEL_ID),
            None,
        )
    }

    /// Fetch the video listing: fresh cache first, then the network.
    /// Unconfigured credentials yield an empty list, not an error.
    pub async fn fetch_videos(&self) -> Result<Vec<VideoItem>, VideoError> {
        if let Some(cached) = self.read_fresh_cache() {
            log::debug!("Serving {} videos from cache", cached.len());
            return Ok(cached);
        }

        let (Some(api_key), Some(channel_id)) = (&self.api_key, &self.channel_id) else {
            log::debug!("Video API not configured - returning empty listing");
            return Ok(Vec::new());
        };

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("key", api_key.as_str()),
                ("channelId", channel_id.as_str()),
                ("part", "snippet"),
                ("type", "video"),
                ("order", "date"),
                ("maxResults", &constants::VIDEO_PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|e| VideoError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VideoError::Server(response.status().as_u16()));
        }

        let listing: SearchResponse = response
            .json()
            .await
            .map_err(|e| VideoError::Parse(e.to_string()))?;

        let videos = map_items(listing);
        self.write_cache(&videos);

        Ok(videos)
    }

    /// Read the cache if present and within the freshness window
    fn read_fresh_cache(&self) -> Option<Vec<VideoItem>> {
        let content = fs::read_to_string(&self.cache_path).ok()?;
        let cache: VideoCache = serde_json::from_str(&content).ok()?;

        if Utc::now().timestamp() - cache.timestamp < constants::VIDEO_CACHE_MAX_AGE {
            Some(cache.data)
        } else {
            None
        }
    }

    /// Persist the listing, best-effort
    fn write_cache(&self, videos: &[VideoItem]) {
        let cache = VideoCache {
            data: videos.to_vec(),
            timestamp: Utc::now().timestamp(),
        };

        let result = serde_json::to_string(&cache)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .and_then(|json| fs::write(&self.cache_path, json));

        if let Err(e) = result {
            log::warn!("Failed to cache video listing: {}", e);
        }
    }
}

/// Normalize API items and sort by publish date, oldest first
fn map_items(listing: SearchResponse) -> Vec<VideoItem> {
    let mut videos: Vec<VideoItem> = listing
        .items
        .into_iter()
        .map(|item| VideoItem {
            id: item.id.video_id,
            title: decode_html_entities(&item.snippet.title),
            description: decode_html_entities(&item.snippet.description),
            published_at: item.snippet.published_at,
            thumbnail: item.snippet.thumbnails.medium.url,
        })
        .collect();

    videos.sort_by_key(|v| v.published_at);
    videos
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_item(id: &str, title: &str, published: &str) -> serde_json::Value {
        serde_json::json!({
            "id": { "videoId": id },
            "snippet": {
                "title": title,
                "description": "A talk",
                "publishedAt": published,
                "thumbnails": { "medium": { "url": "https://img.invalid/m.jpg" } }
            }
        })
    }

    #[test]
    fn test_decode_html_entities() {
        assert_eq!(
            decode_html_entities("Tau &amp; Amyloid: &quot;New&quot; &lt;Findings&gt;"),
            "Tau & Amyloid: \"New\" <Findings>"
        );
        assert_eq!(decode_html_entities("it&#39;s &apos;fine&apos;"), "it's 'fine'");
        assert_eq!(decode_html_entities("no entities"), "no entities");
    }

    #[test]
    fn test_decode_adjacent_and_repeated_entities() {
        assert_eq!(decode_html_entities("&amp;&amp;&lt;&gt;"), "&&<>");
        assert_eq!(decode_html_entities("A &amp; B &amp; C"), "A & B & C");
        // Unknown entities pass through untouched
        assert_eq!(decode_html_entities("&nbsp;&copy;"), "&nbsp;&copy;");
    }

    #[test]
    fn test_map_items_sorts_oldest_first() {
        let listing: SearchResponse = serde_json::from_value(serde_json::json!({
            "items": [
                sample_item("b", "Second", "2022-06-01T00:00:00Z"),
                sample_item("a", "First", "2022-01-01T00:00:00Z"),
                sample_item("c", "Third &amp; Last", "2022-12-01T00:00:00Z"),
            ]
        }))
        .unwrap();

        let videos = map_items(listing);
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].id, "a");
        assert_eq!(videos[2].title, "Third & Last");
    }

    #[tokio::test]
    async fn test_fresh_cache_short_circuits() {
        let temp_dir = TempDir::new().unwrap();
        // Unconfigured client: any result must come from the cache
        let client = VideoClient::new(None, None, Some(temp_dir.path().to_path_buf()));

        let cache = VideoCache {
            data: vec![VideoItem {
                id: "v1".to_string(),
                title: "Cached".to_string(),
                description: String::new(),
                published_at: Utc::now(),
                thumbnail: String::new(),
            }],
            timestamp: Utc::now().timestamp(),
        };
        fs::write(&client.cache_path, serde_json::to_string(&cache).unwrap()).unwrap();

        let videos = client.fetch_videos().await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "v1");
    }

    #[tokio::test]
    async fn test_stale_cache_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let client = VideoClient::new(None, None, Some(temp_dir.path().to_path_buf()));

        let cache = VideoCache {
            data: vec![],
            // Just past the 6-hour window
            timestamp: Utc::now().timestamp() - constants::VIDEO_CACHE_MAX_AGE - 1,
        };
        fs::write(&client.cache_path, serde_json::to_string(&cache).unwrap()).unwrap();

        // Stale cache + unconfigured credentials -> empty, no error
        let videos = client.fetch_videos().await.unwrap();
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let client = VideoClient::new(None, None, Some(temp_dir.path().to_path_buf()));

        let videos = client.fetch_videos().await.unwrap();
        assert!(videos.is_empty());
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Strategy, StrategyHit};
use crate::http::{player_config_headers, HttpFetcher};
use crate::vimeo;

/// Key paths inside the player config document where text-track lists have
/// been observed, in priority order. The document layout shifts between
/// player versions, hence the battery.
const TRACK_KEY_PATHS: [&str; 6] = [
    "request.text_tracks",
    "video.text_tracks",
    "textTracks",
    "request.files.text_tracks",
    "embed.text_tracks",
    "clip.text_tracks",
];

/// Resolves captions by fetching the player configuration JSON and walking
/// known key paths for a text-track list.
pub struct PlayerConfigStrategy {
    fetcher: HttpFetcher,
}

impl PlayerConfigStrategy {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            fetcher: HttpFetcher::new(fetch_timeout),
        }
    }

    /// Follow a dotted key path into a JSON document.
    fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
        let mut node = document;
        for key in path.split('.') {
            node = node.get(key)?;
        }
        Some(node)
    }

    /// Pick a track from a non-empty list: first English track if any,
    /// otherwise the first track unconditionally.
    fn select_track(tracks: &[Value]) -> Option<&Value> {
        let english = tracks.iter().find(|track| {
            track
                .get("lang")
                .and_then(Value::as_str)
                .map(|lang| lang.starts_with("en"))
                .unwrap_or(false)
        });
        english.or_else(|| tracks.first())
    }

    /// Track URLs in the config are sometimes protocol-relative or
    /// path-only; anchor them to vimeo.com.
    fn absolute_track_url(url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else if url.starts_with("//") {
            format!("https:{}", url)
        } else if url.starts_with('/') {
            format!("https://vimeo.com{}", url)
        } else {
            format!("https://vimeo.com/{}", url)
        }
    }

    fn find_track_url(document: &Value) -> Option<String> {
        for path in TRACK_KEY_PATHS {
            let Some(node) = Self::lookup(document, path) else {
                continue;
            };
            let Some(tracks) = node.as_array() else {
                continue;
            };
            if tracks.is_empty() {
                continue;
            }

            debug!("Found {} text tracks at config path {}", tracks.len(), path);
            let track = Self::select_track(tracks)?;
            if let Some(url) = track.get("url").and_then(Value::as_str) {
                return Some(Self::absolute_track_url(url));
            }
        }
        None
    }
}

#[async_trait]
impl Strategy for PlayerConfigStrategy {
    fn name(&self) -> &'static str {
        "player_config"
    }

    async fn attempt(&self, video_id: &str) -> Option<StrategyHit> {
        let config_url = vimeo::player_config_url(video_id);
        info!("🔍 Fetching player config for video {}", video_id);

        let response = match self
            .fetcher
            .get(&config_url, player_config_headers(video_id))
            .await
        {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                debug!("Player config returned HTTP {}", response.status);
                return None;
            }
            Err(e) => {
                warn!("Player config fetch failed: {}", e);
                return None;
            }
        };

        let document: Value = match serde_json::from_str(&response.body) {
            Ok(document) => document,
            Err(e) => {
                debug!("Player config is not valid JSON: {}", e);
                return None;
            }
        };

        let track_url = Self::find_track_url(&document)?;
        info!("✅ Player config exposed text track: {}", track_url);

        Some(StrategyHit {
            method: "player_config",
            resolved_url: track_url,
            raw_content: None,
        })
    }
}

/// Vimeo-specific identifiers and URL templates
///
/// Everything in here encodes reverse-engineered knowledge about how Vimeo
/// lays out video pages, player config endpoints and text-track resources.
/// None of it is documented upstream and any constant may stop matching at
/// any time.

pub mod candidates;
pub mod video_id;

pub use candidates::candidate_track_ids;
pub use video_id::{extract_video_id, VideoRef};

/// Canonical watch page for a video.
pub fn video_page_url(video_id: &str) -> String {
    format!("https://vimeo.com/{}", video_id)
}

/// Player configuration document (JSON) for a video.
pub fn player_config_url(video_id: &str) -> String {
    format!("https://player.vimeo.com/video/{}/config", video_id)
}

/// Text-track resource for a candidate track id, optionally signed with a
/// bearer token query parameter.
pub fn texttrack_url(track_id: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => format!("https://vimeo.com/texttrack/{}.vtt?token={}", track_id, token),
        None => format!("https://vimeo.com/texttrack/{}.vtt", track_id),
    }
}

/// Stand-in text-track token of the documented shape. Tokens are opaque
/// bearer credentials with no known expiry model and go stale without
/// warning; deployments supply currently-working ones via the
/// `strategies.extra_tokens` config list.
pub const KNOWN_TOKEN: &str = "c189e13c_0x2f8a4bd1e06c3957a2b84fd019ce65a73b1d4e82";

/// Shape of a text-track token as it appears in page source.
pub const TOKEN_PATTERN: &str = r"[0-9a-f]{8}_0x[0-9a-f]{40}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texttrack_url_with_token() {
        let url = texttrack_url("249952628", Some("ab12cd34_0xdeadbeef"));
        assert_eq!(
            url,
            "https://vimeo.com/texttrack/249952628.vtt?token=ab12cd34_0xdeadbeef"
        );
    }

    #[test]
    fn test_texttrack_url_bare() {
        assert_eq!(
            texttrack_url("249952628", None),
            "https://vimeo.com/texttrack/249952628.vtt"
        );
    }

    #[test]
    fn test_known_token_matches_token_shape() {
        let re = regex::Regex::new(&format!("^{}$", TOKEN_PATTERN)).unwrap();
        assert!(re.is_match(KNOWN_TOKEN));
    }
}

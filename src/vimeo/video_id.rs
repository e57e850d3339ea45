use regex::Regex;

use crate::error::ExtractError;

/// A video URL paired with the numeric id extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRef {
    pub source_url: String,
    pub video_id: String,
}

/// Extract the numeric video id from a Vimeo URL.
///
/// Matches the first run of decimal digits after the `vimeo.com/` marker,
/// so plain watch URLs, player URLs and URLs with trailing path segments or
/// query strings all work. No normalization or percent-decoding is applied.
pub fn extract_video_id(url: &str) -> Result<VideoRef, ExtractError> {
    if let Ok(re) = Regex::new(r"vimeo\.com/(?:video/)?(\d+)") {
        if let Some(id) = re.captures(url).and_then(|caps| caps.get(1)) {
            return Ok(VideoRef {
                source_url: url.to_string(),
                video_id: id.as_str().to_string(),
            });
        }
    }
    Err(ExtractError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_watch_url() {
        let video = extract_video_id("https://vimeo.com/1109387993").unwrap();
        assert_eq!(video.video_id, "1109387993");
        assert_eq!(video.source_url, "https://vimeo.com/1109387993");
    }

    #[test]
    fn test_extract_from_player_url() {
        let video = extract_video_id("https://player.vimeo.com/video/123456789").unwrap();
        assert_eq!(video.video_id, "123456789");
    }

    #[test]
    fn test_extract_with_trailing_path_and_query() {
        let video = extract_video_id("https://vimeo.com/987654321/abcdef?share=copy").unwrap();
        assert_eq!(video.video_id, "987654321");
    }

    #[test]
    fn test_extract_takes_first_digit_run() {
        let video = extract_video_id("http://vimeo.com/111/222").unwrap();
        assert_eq!(video.video_id, "111");
    }

    #[test]
    fn test_invalid_url_has_no_digits() {
        let err = extract_video_id("https://vimeo.com/channels/staffpicks").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_url_wrong_host() {
        assert!(extract_video_id("https://example.com/1109387993").is_err());
    }
}

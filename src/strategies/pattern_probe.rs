use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{probe_caption_url, Strategy, StrategyHit};
use crate::http::HttpFetcher;
use crate::vimeo::{self, candidate_track_ids};

/// Brute-force strategy: derive candidate track ids from the video id and
/// probe the text-track URL template directly, token-signed variant first.
///
/// Probe order is candidate-major (all variants of candidate 1 before
/// candidate 2) because earlier candidates have the better empirical hit
/// rate; sequential probing with a short timeout keeps the worst case at
/// roughly `probe_timeout * candidates * tokens`.
pub struct PatternProbeStrategy {
    fetcher: HttpFetcher,
    probe_timeout: Duration,
    tokens: Vec<String>,
}

impl PatternProbeStrategy {
    pub fn new(probe_timeout: Duration, extra_tokens: &[String]) -> Self {
        let mut tokens = vec![vimeo::KNOWN_TOKEN.to_string()];
        for token in extra_tokens {
            if !tokens.contains(token) {
                tokens.push(token.clone());
            }
        }

        Self {
            fetcher: HttpFetcher::new(probe_timeout),
            probe_timeout,
            tokens,
        }
    }
}

#[async_trait]
impl Strategy for PatternProbeStrategy {
    fn name(&self) -> &'static str {
        "pattern_method"
    }

    async fn attempt(&self, video_id: &str) -> Option<StrategyHit> {
        let candidates = candidate_track_ids(video_id);
        if candidates.is_empty() {
            return None;
        }

        info!(
            "🎯 Probing {} candidate track ids for video {}",
            candidates.len(),
            video_id
        );

        for candidate in &candidates {
            // Token-signed URL first: unsigned fetches are rejected far
            // more often.
            let mut probe_urls: Vec<String> = self
                .tokens
                .iter()
                .map(|token| vimeo::texttrack_url(candidate, Some(token.as_str())))
                .collect();
            probe_urls.push(vimeo::texttrack_url(candidate, None));

            for url in probe_urls {
                if let Some(body) =
                    probe_caption_url(&self.fetcher, &url, video_id, self.probe_timeout).await
                {
                    info!("✅ Candidate track {} answered with captions", candidate);
                    return Some(StrategyHit {
                        method: "pattern_method",
                        resolved_url: url,
                        raw_content: Some(body),
                    });
                }
            }
        }

        debug!("No candidate track id produced captions for video {}", video_id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_token_always_first() {
        let strategy = PatternProbeStrategy::new(
            Duration::from_secs(8),
            &["11223344_0x0123456789abcdef0123456789abcdef01234567".to_string()],
        );
        assert_eq!(strategy.tokens[0], vimeo::KNOWN_TOKEN);
        assert_eq!(strategy.tokens.len(), 2);
    }

    #[test]
    fn test_duplicate_extra_tokens_collapsed() {
        let strategy =
            PatternProbeStrategy::new(Duration::from_secs(8), &[vimeo::KNOWN_TOKEN.to_string()]);
        assert_eq!(strategy.tokens.len(), 1);
    }
}

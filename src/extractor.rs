use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::ExtractError;
use crate::http::{page_headers, HttpFetcher};
use crate::strategies::{
    BrowserStrategy, PageScrapeStrategy, PatternProbeStrategy, PlayerConfigStrategy, Strategy,
};
use crate::transcript::Transcript;
use crate::vimeo::extract_video_id;
use crate::vtt::{looks_like_vtt, parse_vtt};

/// Runs the resolution chain for one video at a time.
///
/// Strategies are ordered by decreasing reliability and increasing cost and
/// tried strictly sequentially; the first hit short-circuits the rest. A
/// hit that resolves only a URL is fetched and validated here, and treated
/// as that strategy's failure if the fetch comes back empty-handed, so one
/// stale URL cannot sink the whole chain.
pub struct TranscriptExtractor {
    strategies: Vec<Box<dyn Strategy>>,
    fetcher: HttpFetcher,
}

impl TranscriptExtractor {
    /// Build the default chain from configuration: player config, then
    /// pattern probing, then page scraping, then (when enabled and a
    /// session is available) browser automation.
    pub fn new(config: &Config, browser: Option<Arc<dyn BrowserSession>>) -> Self {
        let fetch_timeout = Duration::from_secs(config.http.fetch_timeout);
        let probe_timeout = Duration::from_secs(config.http.probe_timeout);

        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
        if config.strategies.player_config {
            strategies.push(Box::new(PlayerConfigStrategy::new(fetch_timeout)));
        }
        if config.strategies.pattern_probe {
            strategies.push(Box::new(PatternProbeStrategy::new(
                probe_timeout,
                &config.strategies.extra_tokens,
            )));
        }
        if config.strategies.page_scrape {
            strategies.push(Box::new(PageScrapeStrategy::new(fetch_timeout, probe_timeout)));
        }
        if config.strategies.browser {
            if let Some(session) = browser {
                strategies.push(Box::new(BrowserStrategy::new(session)));
            } else {
                warn!("Browser strategy enabled but no browser session wired, skipping");
            }
        }

        Self {
            strategies,
            fetcher: HttpFetcher::new(fetch_timeout),
        }
    }

    /// Build an extractor from an explicit strategy chain.
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>, fetch_timeout: Duration) -> Self {
        Self {
            strategies,
            fetcher: HttpFetcher::new(fetch_timeout),
        }
    }

    /// Resolve and parse the transcript for one video URL.
    pub async fn extract_transcript(&self, video_url: &str) -> Result<Transcript, ExtractError> {
        let video = extract_video_id(video_url)?;
        info!("🚀 Extracting transcript for video {}", video.video_id);

        for strategy in &self.strategies {
            debug!("Trying strategy {}", strategy.name());

            let Some(hit) = strategy.attempt(&video.video_id).await else {
                debug!("Strategy {} found nothing", strategy.name());
                continue;
            };

            let raw = match hit.raw_content {
                Some(raw) => raw,
                None => {
                    match self
                        .fetcher
                        .get_body(&hit.resolved_url, page_headers(&video.video_id))
                        .await
                    {
                        Ok(body) if looks_like_vtt(&body) => body,
                        Ok(_) => {
                            warn!(
                                "Resolved URL from {} is not caption content, continuing chain",
                                strategy.name()
                            );
                            continue;
                        }
                        Err(e) => {
                            warn!(
                                "Fetch of resolved URL from {} failed ({}), continuing chain",
                                strategy.name(),
                                e
                            );
                            continue;
                        }
                    }
                }
            };

            let cues = parse_vtt(&raw);
            info!(
                "🎉 Strategy {} succeeded with {} cues for video {}",
                hit.method,
                cues.len(),
                video.video_id
            );

            return Ok(Transcript::from_cues(
                &video.video_id,
                &video.source_url,
                cues,
                hit.method,
                &hit.resolved_url,
            ));
        }

        Err(ExtractError::NoTranscriptFound {
            video_id: video.video_id,
        })
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

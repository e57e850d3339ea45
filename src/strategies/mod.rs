/// Caption-URL resolution strategies
///
/// Each strategy is one independent, unreliable way of locating a video's
/// text-track resource. The orchestrator runs them in priority order and
/// stops at the first hit; a strategy must therefore never error outward.
/// Network failures, timeouts, block pages and absent data all collapse to
/// `None` with diagnostic logging.

pub mod browser;
pub mod page_scrape;
pub mod pattern_probe;
pub mod player_config;

pub use browser::BrowserStrategy;
pub use page_scrape::PageScrapeStrategy;
pub use pattern_probe::PatternProbeStrategy;
pub use player_config::PlayerConfigStrategy;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::http::{page_headers, HttpFetcher};
use crate::vtt::looks_like_vtt;

/// A successful resolution: where the captions live and, when the strategy
/// already fetched them while probing, the raw body.
#[derive(Debug, Clone)]
pub struct StrategyHit {
    /// Strategy name recorded in the output record.
    pub method: &'static str,
    /// URL the captions were (or can be) fetched from.
    pub resolved_url: String,
    /// Raw caption text when the strategy validated the body itself.
    pub raw_content: Option<String>,
}

/// One attempt at resolving a caption URL for a video id.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Try to resolve captions. `None` means "didn't work, try the next
    /// one"; implementations never propagate errors.
    async fn attempt(&self, video_id: &str) -> Option<StrategyHit>;
}

/// Probe one candidate caption URL. A hit is any 2xx body that looks like
/// caption text; every other outcome (bad status, wrong content, network
/// error, timeout) is absorbed as a miss.
pub(crate) async fn probe_caption_url(
    fetcher: &HttpFetcher,
    url: &str,
    video_id: &str,
    timeout: Duration,
) -> Option<String> {
    match fetcher
        .get_with_timeout(url, page_headers(video_id), timeout)
        .await
    {
        Ok(response) if response.is_success() && looks_like_vtt(&response.body) => {
            Some(response.body)
        }
        Ok(response) => {
            debug!("Probe {} rejected (HTTP {})", url, response.status);
            None
        }
        Err(e) => {
            debug!("Probe {} failed: {}", url, e);
            None
        }
    }
}

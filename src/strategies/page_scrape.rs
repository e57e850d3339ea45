use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::{probe_caption_url, Strategy, StrategyHit};
use crate::http::{page_headers, HttpFetcher};
use crate::vimeo::{self, candidate_track_ids, TOKEN_PATTERN};

/// Phrases that identify Vimeo's bot-check interstitial. Probing a block
/// page wastes the whole probe budget, so the strategy bails immediately.
const SECURITY_CHECK_MARKERS: [&str; 3] = [
    "Verify to continue",
    "security check",
    "Please complete the security check",
];

/// One entry in the extraction battery: a named pattern, scanned in
/// confidence order over the raw page text.
struct ExtractionPattern {
    name: &'static str,
    pattern: &'static str,
}

/// URL-producing patterns. Escaped variants cover caption URLs embedded in
/// JSON string literals inside inline scripts.
const URL_PATTERNS: [ExtractionPattern; 3] = [
    ExtractionPattern {
        name: "full_url",
        pattern: r#"https://vimeo\.com/texttrack/\d+\.vtt[^"'\s\\]*"#,
    },
    ExtractionPattern {
        name: "escaped_url",
        pattern: r#"https:\\/\\/vimeo\.com\\/texttrack\\/\d+\.vtt[^"'\s]*"#,
    },
    ExtractionPattern {
        name: "bare_vtt",
        pattern: r"texttrack\\?/(\d{6,})\.vtt",
    },
];

/// Scrapes the canonical watch page for embedded caption URLs and
/// token-shaped substrings, normalizes every find, and probes each one.
pub struct PageScrapeStrategy {
    fetcher: HttpFetcher,
    probe_timeout: Duration,
}

impl PageScrapeStrategy {
    pub fn new(fetch_timeout: Duration, probe_timeout: Duration) -> Self {
        Self {
            fetcher: HttpFetcher::new(fetch_timeout),
            probe_timeout,
        }
    }

    fn is_security_check(html: &str) -> bool {
        SECURITY_CHECK_MARKERS
            .iter()
            .any(|marker| html.contains(marker))
    }

    /// Pull inline script bodies out of the page and append them to the raw
    /// HTML, so patterns see both the markup and the player bootstrap code.
    fn scan_text(html: &str) -> String {
        let document = Html::parse_document(html);
        let mut text = html.to_string();
        if let Ok(selector) = Selector::parse("script") {
            for script in document.select(&selector) {
                text.push('\n');
                text.push_str(&script.text().collect::<String>());
            }
        }
        text
    }

    /// Strip JSON escapes and stray quoting from a matched fragment.
    fn normalize(fragment: &str) -> String {
        fragment
            .replace("\\/", "/")
            .replace('\\', "")
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string()
    }

    /// Turn a normalized fragment into an absolute probe URL. Bare
    /// `{digits}.vtt` fragments are rebuilt against the track template,
    /// signed with the first available token when one was scraped.
    fn to_probe_url(fragment: &str, tokens: &[String]) -> Option<String> {
        if fragment.starts_with("https://") {
            return url::Url::parse(fragment).ok().map(|u| u.to_string());
        }

        let track_id: String = fragment
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if track_id.len() < 6 {
            return None;
        }
        Some(vimeo::texttrack_url(&track_id, tokens.first().map(String::as_str)))
    }

    /// Run the pattern battery over the page text. Returns candidate URLs
    /// in pattern-confidence order and every token-shaped substring found.
    fn extract_candidates(text: &str) -> (Vec<String>, Vec<String>) {
        let mut tokens: Vec<String> = Vec::new();
        if let Ok(re) = Regex::new(TOKEN_PATTERN) {
            for m in re.find_iter(text) {
                let token = m.as_str().to_string();
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }

        let mut urls: Vec<String> = Vec::new();
        for entry in &URL_PATTERNS {
            let Ok(re) = Regex::new(entry.pattern) else {
                continue;
            };
            let mut found = 0usize;
            for m in re.find_iter(text) {
                let normalized = Self::normalize(m.as_str());
                if let Some(url) = Self::to_probe_url(&normalized, &tokens) {
                    if !urls.contains(&url) {
                        urls.push(url);
                        found += 1;
                    }
                }
            }
            if found > 0 {
                debug!("Pattern {} surfaced {} candidate URLs", entry.name, found);
            }
        }

        (urls, tokens)
    }
}

#[async_trait]
impl Strategy for PageScrapeStrategy {
    fn name(&self) -> &'static str {
        "page_scrape"
    }

    async fn attempt(&self, video_id: &str) -> Option<StrategyHit> {
        let page_url = vimeo::video_page_url(video_id);
        info!("📄 Scraping watch page for video {}", video_id);

        let html = match self.fetcher.get(&page_url, page_headers(video_id)).await {
            Ok(response) if response.is_success() => response.body,
            Ok(response) => {
                debug!("Watch page returned HTTP {}", response.status);
                return None;
            }
            Err(e) => {
                warn!("Watch page fetch failed: {}", e);
                return None;
            }
        };

        if Self::is_security_check(&html) {
            warn!("🚫 Security check interstitial for video {}, aborting scrape", video_id);
            return None;
        }

        let text = Self::scan_text(&html);
        let (urls, tokens) = Self::extract_candidates(&text);
        debug!(
            "Page scan found {} candidate URLs and {} tokens",
            urls.len(),
            tokens.len()
        );

        for url in &urls {
            if let Some(body) =
                probe_caption_url(&self.fetcher, url, video_id, self.probe_timeout).await
            {
                info!("✅ Scraped caption URL answered: {}", url);
                return Some(StrategyHit {
                    method: "page_scrape",
                    resolved_url: url.clone(),
                    raw_content: Some(body),
                });
            }
        }

        // Safety net for partial discovery: tokens were on the page but no
        // usable URL was; pair each token with the best derived track id.
        if let Some(primary) = candidate_track_ids(video_id).into_iter().next() {
            for token in &tokens {
                let url = vimeo::texttrack_url(&primary, Some(token.as_str()));
                if let Some(body) =
                    probe_caption_url(&self.fetcher, &url, video_id, self.probe_timeout).await
                {
                    info!("✅ Scraped token unlocked track {}", primary);
                    return Some(StrategyHit {
                        method: "page_scrape",
                        resolved_url: url,
                        raw_content: Some(body),
                    });
                }
            }
        }

        debug!("Page scrape exhausted for video {}", video_id);
        None
    }
}

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Strategy, StrategyHit};
use crate::browser::BrowserSession;
use crate::vimeo;
use crate::vtt::looks_like_vtt;

/// Selectors that have matched the player's captions toggle across player
/// versions. Clicking it provokes the text-track request when the player
/// lazy-loads captions.
const CC_BUTTON_SELECTORS: [&str; 4] = [
    r#"[data-testid="cc-button"]"#,
    ".vp-captions-button",
    r#"button[aria-label*="caption"]"#,
    r#"button[aria-label*="subtitle"]"#,
];

/// Script run in page context: walk known player config globals for
/// embedded text-track URLs, then fall back to DOM data attributes.
const PAGE_STATE_SCRIPT: &str = r#"
(() => {
    const sources = [
        window.vimeoPlayerConfig,
        window.__INITIAL_STATE__,
        window.playerConfig,
        window.vimeoConfig,
    ];
    for (const source of sources) {
        if (source && typeof source === 'object') {
            const matches = JSON.stringify(source)
                .match(/https:\/\/vimeo\.com\/texttrack\/\d+\.vtt[^"'\s]*/g);
            if (matches && matches.length > 0) {
                return matches;
            }
        }
    }
    const urls = [];
    const attrs = ['data-transcript-url', 'data-captions-url', 'data-subtitle-url'];
    for (const el of document.querySelectorAll(attrs.map(a => `[${a}]`).join(','))) {
        for (const attr of attrs) {
            const url = el.getAttribute(attr);
            if (url && url.includes('.vtt')) {
                urls.push(url);
            }
        }
    }
    return urls;
})()
"#;

/// How long to keep listening for a late text-track response after the
/// page settles and the toggle was clicked.
const CAPTURE_GRACE: Duration = Duration::from_secs(3);

/// Resolves captions by driving a real browser session: observe network
/// traffic for text-track responses, poke the captions toggle, and inspect
/// page globals as a last resort. The network capture wins whenever it
/// fires because it arrives asynchronously during page load.
pub struct BrowserStrategy {
    session: Arc<dyn BrowserSession>,
}

impl BrowserStrategy {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self { session }
    }

    fn urls_from_page_state(value: Value) -> Vec<String> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .filter(|url| url.contains(".vtt"))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl Strategy for BrowserStrategy {
    fn name(&self) -> &'static str {
        "browser_automation"
    }

    async fn attempt(&self, video_id: &str) -> Option<StrategyHit> {
        let page_url = vimeo::video_page_url(video_id);
        info!("🌐 Browser extraction for video {}", video_id);

        // Observer goes in before load so requests fired during page
        // bootstrap are not missed.
        let mut captures = self.session.observe_requests("texttrack");

        if let Err(e) = self.session.load(&page_url).await {
            warn!("Browser page load failed: {}", e);
            return None;
        }

        // Single-slot, first-writer-wins: the first valid captured body is
        // the result, later captures are ignored for this run.
        let mut captured: Option<StrategyHit> = None;

        while let Ok(response) = captures.try_recv() {
            store_capture(&mut captured, response);
        }

        // Provoke the request if nothing arrived during load.
        if captured.is_none() {
            match self.session.find_and_click(&CC_BUTTON_SELECTORS).await {
                Ok(true) => debug!("Clicked captions toggle"),
                Ok(false) => debug!("No captions toggle on page"),
                Err(e) => debug!("Captions toggle click failed: {}", e),
            }

            let deadline = tokio::time::Instant::now() + CAPTURE_GRACE;
            while captured.is_none() {
                let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
                if remaining.is_zero() {
                    break;
                }
                match tokio::time::timeout(remaining, captures.recv()).await {
                    Ok(Some(response)) => store_capture(&mut captured, response),
                    Ok(None) | Err(_) => break,
                }
            }
        }

        if let Some(hit) = captured {
            return Some(hit);
        }

        // Last resort: caption URLs embedded in page globals or DOM data
        // attributes, fetched by navigating the tab itself.
        let state_urls = match self.session.evaluate(PAGE_STATE_SCRIPT).await {
            Ok(value) => Self::urls_from_page_state(value),
            Err(e) => {
                debug!("Page state evaluation failed: {}", e);
                Vec::new()
            }
        };

        for url in state_urls {
            match self.session.navigate(&url).await {
                Ok(response) if response.ok && looks_like_vtt(&response.body) => {
                    info!("✅ Page state URL yielded captions: {}", url);
                    return Some(StrategyHit {
                        method: "browser_automation",
                        resolved_url: url,
                        raw_content: Some(response.body),
                    });
                }
                Ok(_) => debug!("Page state URL rejected: {}", url),
                Err(e) => debug!("Navigation to {} failed: {}", url, e),
            }
        }

        debug!("Browser extraction exhausted for video {}", video_id);
        None
    }
}

/// Write a captured response into the result slot unless an earlier one
/// already claimed it or the body is not caption content.
fn store_capture(slot: &mut Option<StrategyHit>, response: crate::browser::CapturedResponse) {
    if slot.is_none() && looks_like_vtt(&response.body) {
        info!("📡 Network observer captured captions: {}", response.url);
        *slot = Some(StrategyHit {
            method: "browser_automation",
            resolved_url: response.url,
            raw_content: Some(response.body),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls_from_page_state_filters_non_vtt() {
        let urls = BrowserStrategy::urls_from_page_state(json!([
            "https://vimeo.com/texttrack/1.vtt",
            "https://vimeo.com/thumbnail/1.jpg",
        ]));
        assert_eq!(urls, vec!["https://vimeo.com/texttrack/1.vtt".to_string()]);
    }

    #[test]
    fn test_urls_from_page_state_non_array() {
        assert!(BrowserStrategy::urls_from_page_state(json!(null)).is_empty());
        assert!(BrowserStrategy::urls_from_page_state(json!("x")).is_empty());
    }
}

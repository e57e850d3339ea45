use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::Client;
use tracing::debug;

/// Desktop browser identity used for every outbound request. Vimeo serves
/// different page variants to obvious bots.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A fetched response reduced to what the resolution chain needs.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper around `reqwest::Client` with the header discipline every
/// strategy shares. Cloning is cheap; the underlying client is pooled.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// GET a URL, returning status and body text. Network and timeout
    /// errors surface as `Err`; callers inside strategies absorb them.
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<FetchResponse> {
        debug!("GET {}", url);
        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }

    /// GET with a per-call timeout shorter than the client default, for
    /// candidate probing where worst-case latency must stay bounded.
    pub async fn get_with_timeout(
        &self,
        url: &str,
        headers: HeaderMap,
        timeout: Duration,
    ) -> Result<FetchResponse> {
        debug!("GET {} (timeout {:?})", url, timeout);
        let response = self
            .client
            .get(url)
            .headers(headers)
            .timeout(timeout)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }

    /// Fetch and return the body only when the server answered 2xx.
    pub async fn get_body(&self, url: &str, headers: HeaderMap) -> Result<String> {
        let response = self.get(url, headers).await?;
        if !response.is_success() {
            return Err(anyhow!("HTTP error {}: {}", response.status, url));
        }
        Ok(response.body)
    }
}

/// Header set for player config requests: JSON accept plus a referer that
/// matches what the embedded player itself sends.
pub fn player_config_headers(video_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Ok(referer) = HeaderValue::from_str(&format!("https://player.vimeo.com/video/{}", video_id)) {
        headers.insert(REFERER, referer);
    }
    headers
}

/// Header set for page and probe requests: plain browser-like fetch with
/// the watch page as referer.
pub fn page_headers(video_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    if let Ok(referer) = HeaderValue::from_str(&format!("https://vimeo.com/{}", video_id)) {
        headers.insert(REFERER, referer);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_config_headers() {
        let headers = player_config_headers("123456789");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(
            headers.get(REFERER).unwrap(),
            "https://player.vimeo.com/video/123456789"
        );
    }

    #[test]
    fn test_fetch_response_success_range() {
        let ok = FetchResponse { status: 200, body: String::new() };
        let redirect = FetchResponse { status: 302, body: String::new() };
        let missing = FetchResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }
}

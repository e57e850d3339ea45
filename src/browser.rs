use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A response captured by the network observer while a page loads.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub url: String,
    pub body: String,
}

/// Outcome of navigating the browser tab directly to a resource URL.
#[derive(Debug, Clone)]
pub struct NavigationResponse {
    pub ok: bool,
    pub body: String,
}

/// Headless-browser automation collaborator.
///
/// The browser strategy is written entirely against this trait; wiring an
/// actual driver (CDP, WebDriver) is deployment plumbing and lives outside
/// this crate. Tests use an in-memory implementation.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Install a network observer before loading the page. Every response
    /// whose request URL contains `url_marker` is delivered on the returned
    /// channel, in arrival order.
    fn observe_requests(&self, url_marker: &str) -> mpsc::Receiver<CapturedResponse>;

    /// Load a page and wait for it to settle. Fails on load timeout.
    async fn load(&self, url: &str) -> Result<()>;

    /// Locate the first element matching any of the selectors and click it.
    /// Returns false (not an error) when nothing matched.
    async fn find_and_click(&self, selectors: &[&str]) -> Result<bool>;

    /// Evaluate a script in page context and return its JSON result.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Navigate the tab to a URL and return the response body.
    async fn navigate(&self, url: &str) -> Result<NavigationResponse>;
}

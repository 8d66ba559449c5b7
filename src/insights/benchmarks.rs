//! Industry benchmark scraping.
//!
//! Fetches a public benchmarks page and pulls the first cost-per-click figure
//! out of it. Every failure collapses into [`DATA_NOT_AVAILABLE`].

use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

/// Sentinel returned when no CPC figure could be obtained.
pub const DATA_NOT_AVAILABLE: &str = "Data not available";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Scrapes a benchmarks page for a CPC figure.
#[derive(Debug, Clone)]
pub struct BenchmarkFetcher {
    client: reqwest::Client,
    url: String,
}

impl BenchmarkFetcher {
    /// Creates a fetcher for the given page.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a fetcher that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Page this fetcher scrapes.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page and returns the CPC figure, or the sentinel.
    pub async fn fetch_cpc(&self) -> String {
        match self.fetch_page().await {
            Ok(html) => extract_cpc(&html).unwrap_or_else(|| {
                warn!(url = %self.url, "No CPC figure found on benchmarks page");
                DATA_NOT_AVAILABLE.to_owned()
            }),
            Err(e) => {
                warn!(url = %self.url, error = %e, "Failed to fetch benchmarks page");
                DATA_NOT_AVAILABLE.to_owned()
            }
        }
    }

    async fn fetch_page(&self) -> Result<String, reqwest::Error> {
        debug!(url = %self.url, "Fetching benchmarks page");
        self.client
            .get(&self.url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Extracts the first dollar CPC figure from an HTML page.
///
/// Markup is stripped first so figures split across tags still match.
#[must_use]
pub fn extract_cpc(html: &str) -> Option<String> {
    let tags = Regex::new(r"<[^>]*>").ok()?;
    let text = tags.replace_all(html, " ");

    let cpc = Regex::new(
        r"(?i)\b(?:CPC|cost[\s-]per[\s-]click)\b[^$\d<]{0,60}\$\s?(\d+(?:\.\d+)?)",
    )
    .ok()?;

    cpc.captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("${}", m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_text() {
        assert_eq!(
            extract_cpc("The average CPC across industries is $2.69."),
            Some("$2.69".to_owned())
        );
    }

    #[test]
    fn test_extract_across_tags() {
        let html = "<table><tr><td>Average cost per click</td><td><b>$ 1.72</b></td></tr></table>";
        assert_eq!(extract_cpc(html), Some("$1.72".to_owned()));
    }

    #[test]
    fn test_extract_missing() {
        assert_eq!(extract_cpc("<html><body>Nothing to see</body></html>"), None);
        assert_eq!(extract_cpc(""), None);
    }

    #[tokio::test]
    async fn test_fetch_cpc_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ppc-industry-benchmarks")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>Median CPC: <span>$3.10</span></p>")
            .create_async()
            .await;

        let fetcher = BenchmarkFetcher::new(format!("{}/ppc-industry-benchmarks", server.url()));
        assert_eq!(fetcher.fetch_cpc().await, "$3.10");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_cpc_no_figure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html>placeholder</html>")
            .create_async()
            .await;

        let fetcher = BenchmarkFetcher::new(format!("{}/", server.url()));
        assert_eq!(fetcher.fetch_cpc().await, DATA_NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_fetch_cpc_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .with_body("CPC $9.99")
            .create_async()
            .await;

        let fetcher = BenchmarkFetcher::new(format!("{}/", server.url()));
        assert_eq!(fetcher.fetch_cpc().await, DATA_NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_fetch_cpc_unreachable() {
        let fetcher = BenchmarkFetcher::new("http://127.0.0.1:9/benchmarks");
        assert_eq!(fetcher.fetch_cpc().await, DATA_NOT_AVAILABLE);
    }
}

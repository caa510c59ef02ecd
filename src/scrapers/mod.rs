//! Page retrieval and selector-driven extraction.
//!
//! Scraping happens in two phases:
//!
//! 1. **Fetching**: A [`DocumentSource`] downloads the page body
//! 2. **Extracting**: [`selectors::extract_articles`] parses the body and
//!    runs the configured CSS selectors against it
//!
//! Fetching is async; parsing and extraction are synchronous so the parsed
//! tree never has to cross an await point.
//!
//! # Failure handling
//!
//! Fetch failures (transport errors, timeouts, non-2xx statuses) are logged
//! and reported as `None`. Nothing in this module returns an error.

pub mod selectors;

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// Something that can retrieve a document body by URL.
pub trait DocumentSource {
    /// Fetch the body at `url`, or `None` if it could not be retrieved.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// [`DocumentSource`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentSource for HttpSource {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Option<String> {
        let t0 = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Page request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Page request returned non-success status");
            return None;
        }

        match response.text().await {
            Ok(body) => {
                info!(
                    bytes = body.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched page"
                );
                Some(body)
            }
            Err(e) => {
                error!(error = %e, "Failed reading page body");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/news/", addr)
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let url = serve_once("HTTP/1.1 200 OK", "<p>hello</p>").await;
        let source = HttpSource::new(Duration::from_secs(5)).unwrap();
        assert_eq!(source.fetch(&url).await.as_deref(), Some("<p>hello</p>"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_none() {
        let url = serve_once("HTTP/1.1 404 Not Found", "missing").await;
        let source = HttpSource::new(Duration::from_secs(5)).unwrap();
        assert_eq!(source.fetch(&url).await, None);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_none() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(Duration::from_secs(2)).unwrap();
        assert_eq!(source.fetch(&format!("http://{}/", addr)).await, None);
    }
}

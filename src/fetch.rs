//! Single-page HTTP fetch.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{Error, Result};

/// Fetched page body. Consumed by the extractor and then dropped.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// URL after redirects.
    pub url: String,
    pub body: String,
}

/// Source of page bodies. The pipeline is generic over this so it can be
/// driven without a network.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawDocument>;
}

/// Parse and check that `url` is an absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// reqwest-backed fetcher. One GET per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpClient)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument> {
        let parsed = parse_url(url)?;
        let fetch_err = |source: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let final_url = response.url().to_string();
        let bytes = response.bytes().await.map_err(fetch_err)?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|_| Error::Decode {
            url: url.to_string(),
        })?;

        tracing::debug!(url = %final_url, bytes = body.len(), "fetched page");
        Ok(RawDocument {
            url: final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_url("http://example.com/").is_ok());
        assert!(parse_url(" https://example.com/新闻 ").is_ok());
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        for bad in ["example.com", "", "ftp://example.com/", "file:///etc/passwd"] {
            let err = parse_url(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl { .. }), "{bad}");
            assert_eq!(err.kind(), ErrorKind::NetworkFetch);
        }
    }
}

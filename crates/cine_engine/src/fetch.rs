use std::error::Error as _;
use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use serde_json::Value;
use url::Url;

use crate::{CatalogError, DEFAULT_TTL};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    /// Deadline for a whole request, body included.
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            cache_ttl: DEFAULT_TTL,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Issues a GET and decodes the body as JSON.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    request_timeout: Duration,
    max_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CatalogError::network(describe(&err)))?;
        Ok(Self {
            client,
            request_timeout: settings.request_timeout,
            max_bytes: settings.max_bytes,
        })
    }

    /// The request URL carries the credential, so it is stripped first.
    fn map_reqwest_error(&self, err: reqwest::Error) -> CatalogError {
        let err = err.without_url();
        if err.is_timeout() {
            return CatalogError::Timeout(self.request_timeout);
        }
        CatalogError::network(describe(&err))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(CatalogError::network(format!(
                    "response too large (max {}, actual {content_len})",
                    self.max_bytes
                )));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(CatalogError::network(format!(
                    "response too large (max {})",
                    self.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| CatalogError::network(format!("malformed response body: {err}")))
    }
}

/// Error text including its source chain; reqwest keeps the interesting
/// part (DNS, connection refused) in the sources.
fn describe(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

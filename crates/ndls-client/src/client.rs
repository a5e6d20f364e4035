//! Blocking HTTP implementation of [`StandardApi`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::json;
use tracing::debug;

use crate::api::{DetailData, Envelope, SearchData, SearchHit, StandardApi};
use crate::error::{ClientError, Result};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://www.ndls.org.cn";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV_VAR: &str = "NDLS_BASE_URL";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The service rejects bare library user agents.
const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Search page size requested from the list endpoint.
const SEARCH_LIMIT: u32 = 10;

/// Client for the standard lookup service.
pub struct NdlsClient {
    client: Client,
    base_url: String,
}

impl NdlsClient {
    /// Create a client against the default base URL (or `NDLS_BASE_URL`
    /// when set).
    pub fn new() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::from)?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    fn list_url(&self) -> String {
        format!("{}/api/standard/list", self.base_url)
    }

    fn detail_url(&self, service_id: &str) -> String {
        format!("{}/api/standard/detail/{service_id}", self.base_url)
    }

    /// Unwrap the service envelope, surfacing `code != 0` as an error.
    fn unwrap_envelope<T: Default>(envelope: Envelope<T>) -> Result<T> {
        if envelope.code != 0 {
            return Err(ClientError::Api {
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| "未知错误".to_string()),
            });
        }
        Ok(envelope.data.unwrap_or_default())
    }
}

impl StandardApi for NdlsClient {
    fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        debug!(keyword, "searching standards");
        let body = json!({ "a100": keyword, "page": 1, "limit": SEARCH_LIMIT });
        let response = self
            .client
            .post(self.list_url())
            .header(USER_AGENT, BROWSER_UA)
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }
        let envelope: Envelope<SearchData> = response.json()?;
        Ok(Self::unwrap_envelope(envelope)?.results)
    }

    fn detail(&self, service_id: &str) -> Result<DetailData> {
        debug!(service_id, "fetching standard detail");
        let response = self
            .client
            .get(self.detail_url(service_id))
            .header(USER_AGENT, BROWSER_UA)
            .send()?;
        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }
        let envelope: Envelope<DetailData> = response.json()?;
        Self::unwrap_envelope(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        let client = NdlsClient::with_base_url("https://www.ndls.org.cn/").unwrap();
        assert_eq!(client.list_url(), "https://www.ndls.org.cn/api/standard/list");
        assert_eq!(
            client.detail_url("abc123"),
            "https://www.ndls.org.cn/api/standard/detail/abc123"
        );
    }

    #[test]
    fn envelope_error_carries_message() {
        let envelope = Envelope::<SearchData> {
            code: 429,
            message: Some("访问频率过高".to_string()),
            data: None,
        };
        let err = NdlsClient::unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 429, .. }));
    }

    #[test]
    fn envelope_missing_data_defaults_empty() {
        let envelope = Envelope::<SearchData> {
            code: 0,
            message: None,
            data: None,
        };
        let data = NdlsClient::unwrap_envelope(envelope).unwrap();
        assert!(data.results.is_empty());
    }
}

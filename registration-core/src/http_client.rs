//! JSON-over-HTTP plumbing shared by the backend and postal lookup clients.

use anyhow::{anyhow, Context};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub type Result<T> = anyhow::Result<T>;

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout).connect_timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base url '{}'", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("base url '{}' cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_request<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let url = self.endpoint_url(segments)?;
        tracing::debug!("[HTTP] GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("HTTP GET request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP GET {} failed with status: {}", url, status));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {}", url))?;

        serde_json::from_str(&body)
            .with_context(|| format!("failed to parse JSON response from {}: {}", url, body))
    }

    /// Posts `request` as JSON and returns the raw response body.
    pub async fn post_request<T: Serialize>(
        &self,
        segments: &[&str],
        request: &T,
    ) -> Result<String> {
        let url = self.endpoint_url(segments)?;
        tracing::debug!("[HTTP] POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("HTTP POST request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP POST {} failed with status: {}", url, status));
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_segments() {
        let client = HttpClient::new("http://localhost:8080/", None);
        let url = client.endpoint_url(&["api", "form-fields"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/form-fields");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = HttpClient::new("http://gateway.test/udyam", None);
        let url = client.endpoint_url(&["api", "submit"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.test/udyam/api/submit");
    }

    #[test]
    fn test_endpoint_url_encodes_segment() {
        let client = HttpClient::new("https://api.postalpincode.in", None);
        let url = client.endpoint_url(&["pincode", "11/0 1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.postalpincode.in/pincode/11%2F0%201");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = HttpClient::new("not a url", None);
        assert!(client.endpoint_url(&["api"]).is_err());
    }
}

//! `reqwest`-backed transport

use super::{Transport, TransportError, TransportResponse};
use crate::config::CanvasConfig;
use crate::core::request::{HttpMethod, Payload, RequestTarget};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Transport for a live Canvas instance, authenticated with a bearer token
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &CanvasConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| TransportError::Client(format!("Invalid access token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for `target`: paths join the base URL, absolute URLs pass through
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url.join(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, target: &RequestTarget) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(&target.url)?;
        debug!(method = %target.method, url = %url, "Sending request");

        let mut request_builder = match target.method {
            HttpMethod::GET => self.client.get(url),
            HttpMethod::POST => self.client.post(url),
            HttpMethod::PUT => self.client.put(url),
            HttpMethod::DELETE => self.client.delete(url),
        };

        request_builder = match &target.payload {
            Payload::Empty => request_builder,
            Payload::Form(fields) => request_builder.form(fields),
            Payload::Json(body) => request_builder.json(body),
        };

        let response = request_builder
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: target.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| TransportError::Request {
            url: target.url.clone(),
            message: e.to_string(),
        })?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            link,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CanvasConfig {
        CanvasConfig {
            base_url: base_url.to_string(),
            access_token: Some("token".to_string()),
            ..CanvasConfig::default()
        }
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let transport = HttpTransport::new(&config("https://canvas.example.edu")).unwrap();
        assert_eq!(
            transport.resolve("/api/v1/courses/1").unwrap().as_str(),
            "https://canvas.example.edu/api/v1/courses/1"
        );
        assert_eq!(
            transport
                .resolve("https://canvas.example.edu/api/v1/courses/1/users?page=2")
                .unwrap()
                .as_str(),
            "https://canvas.example.edu/api/v1/courses/1/users?page=2"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpTransport::new(&config("not a url")),
            Err(TransportError::InvalidUrl { .. })
        ));
    }
}

//! HTTP transport seam
//!
//! Every exchange with Canvas goes through [`Transport`]. [`HttpTransport`]
//! talks to a real instance; [`ScriptedTransport`] answers from a closure and
//! records what it was asked.

mod http;
mod scripted;

pub use http::HttpTransport;
pub use scripted::{RecordedCall, ScriptedTransport};

use crate::core::request::RequestTarget;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures where no HTTP status was received
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl TransportError {
    /// Short diagnostic used in failure messages
    pub fn diagnostic(&self) -> &str {
        match self {
            Self::InvalidUrl { message, .. } | Self::Request { message, .. } => message,
            Self::Client(message) => message,
        }
    }
}

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Reason phrase, e.g. `"Not Found"`
    pub reason: String,
    /// Raw `Link` header, if any
    pub link: Option<String>,
    pub body: String,
}

impl TransportResponse {
    pub fn new<R: Into<String>, B: Into<String>>(status: u16, reason: R, body: B) -> Self {
        Self {
            status,
            reason: reason.into(),
            link: None,
            body: body.into(),
        }
    }

    /// `200 OK` with a body
    pub fn ok<B: Into<String>>(body: B) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn with_link<L: Into<String>>(mut self, link: L) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Executes one request against Canvas
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, target: &RequestTarget) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, target: &RequestTarget) -> Result<TransportResponse, TransportError> {
        (**self).execute(target).await
    }
}

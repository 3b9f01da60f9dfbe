//! Collection reader that follows `rel="next"` until exhausted

use super::link::next_link;
use crate::core::request::RequestTarget;
use crate::core::transport::{Transport, TransportError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// A prerequisite read failed; the whole operation stops before any write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("ERROR {status} while retrieving data from Canvas ({url}): {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("ERROR while retrieving data from Canvas ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Unexpected response from Canvas ({url}): {message}")]
    Decode { url: String, message: String },

    #[error("Pagination loop detected: {url} was already read")]
    Loop { url: String },
}

impl ReadError {
    /// The URL whose read failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Transport { url, .. }
            | Self::Decode { url, .. }
            | Self::Loop { url } => url,
        }
    }
}

/// GET a single JSON resource
pub async fn fetch_json<T, R>(transport: &T, url: &str) -> Result<R, ReadError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let response = transport
        .execute(&RequestTarget::get(url))
        .await
        .map_err(|source| ReadError::Transport {
            url: url.to_string(),
            source,
        })?;

    if !response.is_success() {
        warn!(url, status = response.status, "Read failed");
        return Err(ReadError::Status {
            url: url.to_string(),
            status: response.status,
            reason: response.reason,
        });
    }

    response.json().map_err(|e| ReadError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Reads a complete paginated collection
pub struct PaginatedReader<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> PaginatedReader<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetch `url` and every page after it, concatenating records in page order.
    ///
    /// Returns only after the last page; any failing page aborts the read with
    /// that page's URL and status.
    pub async fn read_all<R: DeserializeOwned>(&self, url: &str) -> Result<Vec<R>, ReadError> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(url.to_string());
        let mut pages = 0usize;

        while let Some(page_url) = next.take() {
            if !visited.insert(page_url.clone()) {
                return Err(ReadError::Loop { url: page_url });
            }

            let response = self
                .transport
                .execute(&RequestTarget::get(page_url.as_str()))
                .await
                .map_err(|source| ReadError::Transport {
                    url: page_url.clone(),
                    source,
                })?;

            if !response.is_success() {
                warn!(url = %page_url, status = response.status, "Page read failed");
                return Err(ReadError::Status {
                    url: page_url,
                    status: response.status,
                    reason: response.reason,
                });
            }

            let page: Vec<R> = response.json().map_err(|e| ReadError::Decode {
                url: page_url.clone(),
                message: e.to_string(),
            })?;
            pages += 1;
            debug!(url = %page_url, records = page.len(), "Read page");
            records.extend(page);

            next = response.link.as_deref().and_then(next_link);
        }

        debug!(url, pages, records = records.len(), "Read collection");
        Ok(records)
    }
}

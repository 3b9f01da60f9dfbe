//! Pending write requests
//!
//! A [`PendingRequest`] is built once by a workflow, handed to the
//! dispatcher, and never mutated afterwards.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    /// `application/x-www-form-urlencoded` pairs, sent in order
    Form(Vec<(String, String)>),
    Json(Value),
}

impl Payload {
    /// Value of the first form field named `key`
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// Where and what to send
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTarget {
    pub method: HttpMethod,
    /// Path relative to the Canvas base URL, or an absolute URL
    pub url: String,
    pub payload: Payload,
}

impl RequestTarget {
    pub fn get<U: Into<String>>(url: U) -> Self {
        Self {
            method: HttpMethod::GET,
            url: url.into(),
            payload: Payload::Empty,
        }
    }

    pub fn delete<U: Into<String>>(url: U) -> Self {
        Self {
            method: HttpMethod::DELETE,
            url: url.into(),
            payload: Payload::Empty,
        }
    }

    pub fn form<U, I, K, V>(method: HttpMethod, url: U, fields: I) -> Self
    where
        U: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method,
            url: url.into(),
            payload: Payload::Form(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn json<U: Into<String>>(method: HttpMethod, url: U, body: Value) -> Self {
        Self {
            method,
            url: url.into(),
            payload: Payload::Json(body),
        }
    }
}

/// Canned failure message; renders as `"{prefix}{status} - {diagnostic}"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTemplate {
    prefix: String,
}

impl ErrorTemplate {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn render(&self, status: u16, diagnostic: &str) -> String {
        format!("{}{} - {}", self.prefix, status, diagnostic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub target: RequestTarget,
    pub error: ErrorTemplate,
}

impl PendingRequest {
    pub fn new(target: RequestTarget, error: ErrorTemplate) -> Self {
        Self { target, error }
    }
}

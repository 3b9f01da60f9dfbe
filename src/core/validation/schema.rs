//! Schema descriptors for named-column spreadsheets

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)\s*$").expect("Invalid trailing id regex"));

/// How a data column's header maps to a remote resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDecoder {
    /// `"Quiz 1 (111)"` → id `111`
    TrailingId,
    /// `"Points: Thesis"` → name `"Thesis"`, resolved later against a remote list
    Prefixed(String),
}

/// Decoded reference to the remote resource behind a data column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Id(u64),
    Name(String),
}

impl ColumnDecoder {
    pub fn decode(&self, header: &str) -> Option<ColumnKey> {
        match self {
            Self::TrailingId => TRAILING_ID
                .captures(header)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .map(ColumnKey::Id),
            Self::Prefixed(prefix) => header
                .strip_prefix(prefix.as_str())
                .filter(|name| !name.trim().is_empty())
                .map(|name| ColumnKey::Name(name.to_string())),
        }
    }

    /// Human description of the expected header format
    pub fn expectation(&self) -> String {
        match self {
            Self::TrailingId => "a name ending in the id in parentheses, e.g. \"Quiz 1 (111)\"".to_string(),
            Self::Prefixed(prefix) => format!("\"{}<name>\"", prefix),
        }
    }
}

/// What a spreadsheet must look like for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    identity_column: String,
    metadata_columns: Vec<String>,
    decoder: ColumnDecoder,
}

impl RowSchema {
    pub fn new<S: Into<String>>(identity_column: S, decoder: ColumnDecoder) -> Self {
        Self {
            identity_column: identity_column.into(),
            metadata_columns: Vec::new(),
            decoder,
        }
    }

    /// Columns carried along for reference but never written
    pub fn with_metadata_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn identity_column(&self) -> &str {
        &self.identity_column
    }

    pub fn decoder(&self) -> &ColumnDecoder {
        &self.decoder
    }

    pub fn is_data_column(&self, header: &str) -> bool {
        header != self.identity_column && !self.metadata_columns.iter().any(|m| m == header)
    }
}

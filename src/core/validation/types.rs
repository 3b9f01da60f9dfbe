//! Validated table types and validation errors

use super::schema::ColumnKey;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Structural defects that stop an import before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File should contain a header row and at least one data row")]
    EmptyTable,

    #[error("No '{0}' column found")]
    MissingIdentityColumn(String),

    #[error("Header row should have a '{0}' column and at least one data column")]
    TooFewColumns(String),

    #[error("\"{column}\" is not a properly formatted column name; expected {expected}")]
    MalformedColumn { column: String, expected: String },

    #[error("The column \"{0}\" appears more than once in the header row")]
    DuplicateColumn(String),

    #[error("'{value}' appears more than once in the '{column}' column")]
    DuplicateIdentity { column: String, value: String },

    #[error("No row has a value in the '{0}' column")]
    NoValidRows(String),

    #[error("Nothing to send: every data cell is blank or unmatched")]
    NoOperations,

    #[error("{count} requests is above the max of {max} per import. Please split the file into smaller chunks")]
    TooManyRequests { count: usize, max: usize },

    #[error("Could not identify the {0} column of the spreadsheet. Re-download the Zoom participants export and try again")]
    MissingAttendanceColumn(&'static str),

    #[error("The spreadsheet contains {0} duplicate users. Select \"Show unique users\" when exporting the Zoom report and try again")]
    DuplicateAttendees(usize),
}

/// Advisory message about input that was excluded without failing the import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub summary: String,
    pub items: Vec<String>,
}

impl Notice {
    /// Items shown when a notice is displayed
    pub const DISPLAY_LIMIT: usize = 10;

    pub fn new<S: Into<String>>(summary: S, items: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            items,
        }
    }

    pub fn rows_without_identity(column: &str, count: usize) -> Self {
        Self::new(
            format!("{} rows skipped: no '{}' value", count, column),
            Vec::new(),
        )
    }

    pub fn unknown_identities(items: Vec<String>) -> Self {
        Self::new(
            format!(
                "{} students will not be imported because they are not enrolled in the course",
                items.len()
            ),
            items,
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOTICE - {}", self.summary)?;
        if !self.items.is_empty() {
            let lead = if self.items.len() > Self::DISPLAY_LIMIT {
                "The first ten are"
            } else {
                "They are"
            };
            write!(
                f,
                ". {} listed below:\n  {}",
                lead,
                self.items
                    .iter()
                    .take(Self::DISPLAY_LIMIT)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n  ")
            )?;
        }
        Ok(())
    }
}

/// A data column whose header decoded successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn {
    pub header: String,
    pub key: ColumnKey,
}

/// A row that passed validation: identity plus its non-blank data cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRow {
    pub identity: String,
    /// `(index into ValidatedTable::columns, cell value)`
    pub cells: Vec<(usize, String)>,
}

/// One write derived from one data cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation<'a> {
    pub identity: &'a str,
    pub column: &'a DataColumn,
    pub value: &'a str,
}

/// Output of [`validate`](super::validate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTable {
    pub identity_column: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<ValidRow>,
    pub notices: Vec<Notice>,
}

impl ValidatedTable {
    /// Every non-blank data cell, row by row in input order
    pub fn operations(&self) -> impl Iterator<Item = Operation<'_>> {
        self.rows.iter().flat_map(move |row| {
            row.cells.iter().map(move |(index, value)| Operation {
                identity: &row.identity,
                column: &self.columns[*index],
                value,
            })
        })
    }

    pub fn operation_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    /// Drop rows whose identity is not in `known`, recording a notice.
    /// Returns how many rows were dropped.
    pub fn retain_identities(&mut self, known: &HashSet<String>) -> usize {
        let mut unknown = Vec::new();
        self.rows.retain(|row| {
            let keep = known.contains(&row.identity);
            if !keep {
                unknown.push(row.identity.clone());
            }
            keep
        });
        let dropped = unknown.len();
        if dropped > 0 {
            self.notices.push(Notice::unknown_identities(unknown));
        }
        dropped
    }
}

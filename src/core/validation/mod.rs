//! Row validation
//!
//! Turns a [`Table`](crate::core::table::Table) into a [`ValidatedTable`] of
//! typed [`Operation`]s, or rejects it with the first structural defect.

mod schema;
mod types;
mod validator;

pub use schema::{ColumnDecoder, ColumnKey, RowSchema};
pub use types::{DataColumn, Notice, Operation, ValidRow, ValidatedTable, ValidationError};
pub use validator::{enforce_request_cap, validate};

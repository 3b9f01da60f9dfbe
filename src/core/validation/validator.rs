//! Named-column validation

use super::schema::RowSchema;
use super::types::{DataColumn, Notice, ValidRow, ValidatedTable, ValidationError};
use crate::core::table::Table;
use std::collections::HashSet;
use tracing::debug;

/// Validate `table` against `schema`.
///
/// Checks run in order and the first failure wins: empty table, missing
/// identity column, too few columns, repeated header, malformed data column
/// header, duplicate identity value. Rows with a blank identity are skipped with a notice;
/// blank data cells are dropped silently.
pub fn validate(table: &Table, schema: &RowSchema) -> Result<ValidatedTable, ValidationError> {
    let identity = schema.identity_column();

    if table.is_empty() {
        return Err(ValidationError::EmptyTable);
    }
    if !table.headers().iter().any(|h| h == identity) {
        return Err(ValidationError::MissingIdentityColumn(identity.to_string()));
    }
    if table.headers().len() < 2 {
        return Err(ValidationError::TooFewColumns(identity.to_string()));
    }

    let mut headers = HashSet::new();
    if let Some(repeated) = table.headers().iter().find(|h| !headers.insert(h.as_str())) {
        return Err(ValidationError::DuplicateColumn(repeated.clone()));
    }

    let mut columns = Vec::new();
    for header in table.headers().iter().filter(|h| schema.is_data_column(h)) {
        let key = schema
            .decoder()
            .decode(header)
            .ok_or_else(|| ValidationError::MalformedColumn {
                column: header.clone(),
                expected: schema.decoder().expectation(),
            })?;
        columns.push(DataColumn {
            header: header.clone(),
            key,
        });
    }
    if columns.is_empty() {
        return Err(ValidationError::TooFewColumns(identity.to_string()));
    }

    let mut rows = Vec::with_capacity(table.len());
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    for row in table.rows() {
        let value = row.get(identity).unwrap_or_default().trim();
        if value.is_empty() {
            skipped += 1;
            continue;
        }
        if !seen.insert(value.to_string()) {
            return Err(ValidationError::DuplicateIdentity {
                column: identity.to_string(),
                value: value.to_string(),
            });
        }

        let cells = columns
            .iter()
            .enumerate()
            .filter_map(|(index, column)| {
                row.get(&column.header)
                    .filter(|cell| !cell.trim().is_empty())
                    .map(|cell| (index, cell.to_string()))
            })
            .collect();

        rows.push(ValidRow {
            identity: value.to_string(),
            cells,
        });
    }

    if rows.is_empty() {
        return Err(ValidationError::NoValidRows(identity.to_string()));
    }

    let mut notices = Vec::new();
    if skipped > 0 {
        notices.push(Notice::rows_without_identity(identity, skipped));
    }

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        skipped,
        "Validated spreadsheet"
    );

    Ok(ValidatedTable {
        identity_column: identity.to_string(),
        columns,
        rows,
        notices,
    })
}

/// Reject an empty batch, or one larger than `max`, before anything is sent
pub fn enforce_request_cap(count: usize, max: usize) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::NoOperations);
    }
    if count > max {
        return Err(ValidationError::TooManyRequests { count, max });
    }
    Ok(())
}

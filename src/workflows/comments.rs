//! Comment import
//!
//! One row per student keyed by `SIS User ID`; every other column is an
//! assignment named `"<title> (<assignment id>)"` whose cells are posted as
//! submission comments.

use super::{BulkContext, ImportPlan};
use crate::canvas::paths;
use crate::core::request::{ErrorTemplate, HttpMethod, PendingRequest, RequestTarget};
use crate::core::table::Table;
use crate::core::transport::Transport;
use crate::core::validation::{ColumnDecoder, ColumnKey, RowSchema, ValidatedTable, validate};
use crate::utils::error::Result;
use tracing::debug;

pub const IDENTITY_COLUMN: &str = "SIS User ID";

pub fn comment_schema() -> RowSchema {
    RowSchema::new(IDENTITY_COLUMN, ColumnDecoder::TrailingId)
}

/// One comment request per non-blank cell, row by row
pub fn build_comment_requests(course_id: u64, validated: &ValidatedTable) -> Vec<PendingRequest> {
    validated
        .operations()
        .filter_map(|op| {
            let ColumnKey::Id(assignment_id) = op.column.key else {
                return None;
            };
            let url = paths::submission_by_sis_id(course_id, assignment_id, op.identity);
            let error = ErrorTemplate::new(format!(
                "Failed to post comment for student {} and assignment {} using endpoint {}. Response: ",
                op.identity, op.column.header, url
            ));
            Some(PendingRequest::new(
                RequestTarget::form(HttpMethod::PUT, url, [("comment[text_comment]", op.value)]),
                error,
            ))
        })
        .collect()
}

pub fn plan_comment_import<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    table: &Table,
) -> Result<ImportPlan> {
    let validated = validate(table, &comment_schema())?;
    let requests = build_comment_requests(course_id, &validated);
    debug!(course_id, requests = requests.len(), "Built comment requests");
    ImportPlan::new(requests, validated.notices, "comments", ctx.max_requests())
}

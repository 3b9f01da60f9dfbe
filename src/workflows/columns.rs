//! Custom gradebook columns

use super::BulkContext;
use crate::canvas::CustomColumn;
use crate::core::transport::Transport;
use crate::utils::error::{BulkError, Result};
use tracing::info;

fn checked_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BulkError::invalid_input("Column title must not be blank"));
    }
    Ok(title)
}

/// Create a custom column unless one with the same title exists
pub async fn add_column<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    title: &str,
) -> Result<CustomColumn> {
    let title = checked_title(title)?;
    let columns = ctx.api.custom_columns(course_id).await?;
    if columns.iter().any(|c| c.title == title) {
        return Err(BulkError::conflict(format!(
            "A column named \"{}\" already exists.",
            title
        )));
    }
    let column = ctx.api.create_custom_column(course_id, title).await?;
    info!(course_id, column_id = column.id, "Column added");
    Ok(column)
}

/// Delete the custom column whose title matches exactly
pub async fn remove_column<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    title: &str,
) -> Result<CustomColumn> {
    let title = checked_title(title)?;
    let column = ctx
        .api
        .custom_columns(course_id)
        .await?
        .into_iter()
        .find(|c| c.title == title)
        .ok_or_else(|| BulkError::not_found(format!("Could not find a column named \"{}\".", title)))?;
    ctx.api.delete_custom_column(course_id, column.id).await?;
    Ok(column)
}

//! Rubric score export
//!
//! Writes one row per submission in the layout the rubric import reads back.

use super::rubric_import::{IDENTITY_COLUMN, METADATA_COLUMNS, POINTS_PREFIX};
use super::BulkContext;
use crate::canvas::{Assignment, Enrollment, Submission, User, format_number};
use crate::core::transport::Transport;
use crate::utils::error::{BulkError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    /// Submissions whose user is not enrolled in the course
    pub missing_users: usize,
}

/// `Rubric Scores <name>.csv`, keeping only letters, digits and spaces of the name
pub fn export_file_name(assignment_name: &str) -> String {
    let cleaned: String = assignment_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    format!("Rubric Scores {}.csv", cleaned.trim())
}

pub fn export_header(assignment: &Assignment) -> Vec<String> {
    let [name, posted, attempt] = METADATA_COLUMNS;
    let mut header: Vec<String> = [name, IDENTITY_COLUMN, posted, attempt]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(
        assignment
            .rubric()
            .iter()
            .map(|c| format!("{}{}", POINTS_PREFIX, c.description)),
    );
    header
}

/// Header plus one record per submission, in submission order
pub fn build_export_rows(
    assignment: &Assignment,
    enrollments: &[Enrollment],
    submissions: &[Submission],
) -> (Vec<Vec<String>>, usize) {
    let users: HashMap<u64, &User> = enrollments.iter().map(|e| (e.user_id, &e.user)).collect();
    let mut rows = vec![export_header(assignment)];
    let mut missing = 0;

    for submission in submissions {
        let Some(user) = users.get(&submission.user_id) else {
            missing += 1;
            rows.push(vec![format!("Error: Could not find user {}", submission.user_id)]);
            continue;
        };

        let mut row = vec![
            user.name.clone().unwrap_or_default(),
            user.sis_user_id.clone().unwrap_or_default(),
            submission.score.map(format_number).unwrap_or_default(),
            submission.attempt.map(|a| a.to_string()).unwrap_or_default(),
        ];
        for criterion in assignment.rubric() {
            let points = submission
                .rubric_assessment
                .as_ref()
                .and_then(|a| a.get(&criterion.id))
                .and_then(|fields| fields.get("points"))
                .and_then(|p| p.as_f64())
                .map(format_number)
                .unwrap_or_default();
            row.push(points);
        }
        rows.push(row);
    }

    (rows, missing)
}

pub fn write_export(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn export_rubric_scores<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    assignment_id: u64,
) -> Result<ExportSummary> {
    let assignment = ctx.api.assignment(course_id, assignment_id).await?;
    if assignment.rubric().is_empty() {
        return Err(BulkError::not_found(format!(
            "Assignment {} ({}) has no rubric",
            assignment.name, assignment.id
        )));
    }
    let enrollments = ctx.api.enrollments(course_id).await?;
    let submissions = ctx
        .api
        .submissions_with_rubric(course_id, assignment_id)
        .await?;

    let (rows, missing_users) = build_export_rows(&assignment, &enrollments, &submissions);
    tokio::fs::create_dir_all(&ctx.report.output_dir).await?;
    let path = ctx.report.output_dir.join(export_file_name(&assignment.name));
    write_export(&path, &rows)?;

    info!(
        path = %path.display(),
        rows = rows.len() - 1,
        missing_users,
        "Exported rubric scores"
    );
    Ok(ExportSummary {
        path,
        rows: rows.len() - 1,
        missing_users,
    })
}

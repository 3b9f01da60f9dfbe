//! Rubric score import
//!
//! Reads a sheet shaped like the rubric export: `Student ID` identifies the
//! student by SIS id and each `Points: <criterion>` column sets that
//! criterion's points. Whatever else the student's saved assessment holds is
//! sent back unchanged so the update never clears it.

use super::{BulkContext, ImportPlan};
use crate::canvas::{Assignment, CriterionAssessment, Submission, format_number, paths};
use crate::core::request::{ErrorTemplate, HttpMethod, PendingRequest, RequestTarget};
use crate::core::table::Table;
use crate::core::transport::Transport;
use crate::core::validation::{
    ColumnDecoder, ColumnKey, Notice, RowSchema, ValidatedTable, validate,
};
use crate::utils::error::{BulkError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

pub const IDENTITY_COLUMN: &str = "Student ID";
pub const POINTS_PREFIX: &str = "Points: ";
pub const METADATA_COLUMNS: [&str; 3] = ["Student Name", "Posted Score", "Attempt Number"];

pub fn rubric_schema() -> RowSchema {
    RowSchema::new(IDENTITY_COLUMN, ColumnDecoder::Prefixed(POINTS_PREFIX.to_string()))
        .with_metadata_columns(METADATA_COLUMNS)
}

/// Requests built for a rubric import plus the items that could not be used
#[derive(Debug, Clone, Default)]
pub struct RubricRequests {
    pub requests: Vec<PendingRequest>,
    pub notices: Vec<Notice>,
}

/// Form value for a saved assessment field
fn field_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Build one PUT per student.
///
/// `existing` maps SIS id to the student's saved rubric assessment. For every
/// criterion in the saved assessment each field is echoed back; criteria set by
/// the sheet get their `points` replaced. `comments` is always sent, blank when
/// nothing was saved.
pub fn build_rubric_requests(
    course_id: u64,
    assignment: &Assignment,
    validated: &ValidatedTable,
    existing: &HashMap<String, BTreeMap<String, CriterionAssessment>>,
) -> RubricRequests {
    let mut unmatched = BTreeSet::new();
    let mut non_numeric = Vec::new();
    let mut requests = Vec::new();

    for row in &validated.rows {
        let mut assessment: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

        if let Some(saved) = existing.get(&row.identity) {
            for (criterion_id, fields) in saved {
                let entry = assessment.entry(criterion_id.clone()).or_default();
                for (field, value) in fields {
                    entry.push((field.clone(), field_value(value)));
                }
            }
        }

        let mut overridden = false;
        for (index, value) in &row.cells {
            let column = &validated.columns[*index];
            let ColumnKey::Name(description) = &column.key else {
                continue;
            };
            let Some(criterion) = assignment.criterion_by_description(description) else {
                unmatched.insert(description.clone());
                continue;
            };
            let points = value.trim();
            if points.parse::<f64>().is_err() {
                non_numeric.push(format!("{} / {}: {}", row.identity, description, points));
                continue;
            }

            let entry = assessment.entry(criterion.id.clone()).or_default();
            match entry.iter_mut().find(|(field, _)| field == "points") {
                Some((_, existing)) => *existing = points.to_string(),
                None => entry.push(("points".to_string(), points.to_string())),
            }
            overridden = true;
        }

        if !overridden {
            continue;
        }

        let mut fields = Vec::new();
        for (criterion_id, mut entry) in assessment {
            if !entry.iter().any(|(field, _)| field == "comments") {
                entry.push(("comments".to_string(), String::new()));
            }
            for (field, value) in entry {
                fields.push((format!("rubric_assessment[{}][{}]", criterion_id, field), value));
            }
        }

        let url = paths::submission_by_sis_id(course_id, assignment.id, &row.identity);
        let error = ErrorTemplate::new(format!(
            "Failed to import scores for student {} using endpoint {}. Response: ",
            row.identity, url
        ));
        requests.push(PendingRequest::new(
            RequestTarget::form(HttpMethod::PUT, url, fields),
            error,
        ));
    }

    let mut notices = Vec::new();
    if !unmatched.is_empty() {
        notices.push(Notice::new(
            format!(
                "{} columns will not be imported because they do not match a criterion in the rubric for {}",
                unmatched.len(),
                assignment.name
            ),
            unmatched.into_iter().collect(),
        ));
    }
    if !non_numeric.is_empty() {
        notices.push(Notice::new(
            format!("{} scores will not be imported because they are not numbers", non_numeric.len()),
            non_numeric,
        ));
    }

    RubricRequests { requests, notices }
}

/// Saved assessments keyed by SIS id
pub fn assessments_by_sis_id(
    sis_to_user: &HashMap<String, u64>,
    submissions: &[Submission],
) -> HashMap<String, BTreeMap<String, CriterionAssessment>> {
    let by_user: HashMap<u64, &BTreeMap<String, CriterionAssessment>> = submissions
        .iter()
        .filter_map(|s| s.rubric_assessment.as_ref().map(|a| (s.user_id, a)))
        .collect();
    sis_to_user
        .iter()
        .filter_map(|(sis, user_id)| by_user.get(user_id).map(|a| (sis.clone(), (*a).clone())))
        .collect()
}

pub async fn plan_rubric_import<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    assignment_id: u64,
    table: &Table,
) -> Result<ImportPlan> {
    let mut validated = validate(table, &rubric_schema())?;

    let assignment = ctx.api.assignment(course_id, assignment_id).await?;
    if assignment.rubric().is_empty() {
        return Err(BulkError::not_found(format!(
            "Assignment {} ({}) has no rubric",
            assignment.name, assignment.id
        )));
    }

    let enrollments = ctx.api.enrollments(course_id).await?;
    let sis_to_user: HashMap<String, u64> = enrollments
        .iter()
        .filter_map(|e| e.user.sis_user_id.clone().map(|sis| (sis, e.user_id)))
        .collect();
    let known: HashSet<String> = sis_to_user.keys().cloned().collect();
    let dropped = validated.retain_identities(&known);
    if dropped > 0 {
        info!(dropped, "Students not found in course roster");
    }

    let submissions = ctx
        .api
        .submissions_with_rubric(course_id, assignment_id)
        .await?;
    let existing = assessments_by_sis_id(&sis_to_user, &submissions);

    let built = build_rubric_requests(course_id, &assignment, &validated, &existing);
    debug!(
        course_id,
        assignment_id,
        requests = built.requests.len(),
        "Built rubric requests"
    );

    let mut notices = validated.notices;
    notices.extend(built.notices);
    ImportPlan::new(built.requests, notices, "rubric scores", ctx.max_requests())
}

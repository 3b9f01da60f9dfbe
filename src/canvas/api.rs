//! Canvas API facade

use super::models::*;
use super::paths;
use crate::core::pagination::{PaginatedReader, fetch_json};
use crate::core::request::{HttpMethod, RequestTarget};
use crate::core::transport::{Transport, TransportResponse};
use crate::utils::error::{BulkError, Result};
use serde_json::{Value, json};
use tracing::{debug, info};

const PER_PAGE: &str = "per_page=100";

const SET_POST_POLICY: &str = "mutation SetAssignmentPostPolicy($assignmentId: ID!, $postManually: Boolean!) {\n  setAssignmentPostPolicy(input: {assignmentId: $assignmentId, postManually: $postManually}) {\n    postPolicy {\n      postManually\n    }\n    errors {\n      attribute\n      message\n    }\n  }\n}\n";

/// Prerequisite reads and one-off writes against a Canvas instance
pub struct CanvasApi<T: Transport> {
    transport: T,
}

impl<T: Transport> CanvasApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn reader(&self) -> PaginatedReader<'_, T> {
        PaginatedReader::new(&self.transport)
    }

    pub async fn course(&self, course_id: u64) -> Result<Course> {
        Ok(fetch_json(&self.transport, &paths::course(course_id)).await?)
    }

    pub async fn assignment(&self, course_id: u64, assignment_id: u64) -> Result<Assignment> {
        Ok(fetch_json(&self.transport, &paths::assignment(course_id, assignment_id)).await?)
    }

    /// Assignment with its overrides and its own (not overridden) base dates
    pub async fn assignment_with_overrides(
        &self,
        course_id: u64,
        assignment_id: u64,
    ) -> Result<Assignment> {
        let url = format!(
            "{}?include[]=overrides&override_assignment_dates=false",
            paths::assignment(course_id, assignment_id)
        );
        Ok(fetch_json(&self.transport, &url).await?)
    }

    pub async fn enrollments(&self, course_id: u64) -> Result<Vec<Enrollment>> {
        let url = format!("{}?{}", paths::enrollments(course_id), PER_PAGE);
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn active_student_enrollments(&self, course_id: u64) -> Result<Vec<Enrollment>> {
        let url = format!(
            "{}?type[]=StudentEnrollment&state[]=active&{}",
            paths::enrollments(course_id),
            PER_PAGE
        );
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn submissions(&self, course_id: u64, assignment_id: u64) -> Result<Vec<Submission>> {
        let url = format!("{}?{}", paths::submissions(course_id, assignment_id), PER_PAGE);
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn submissions_with_rubric(
        &self,
        course_id: u64,
        assignment_id: u64,
    ) -> Result<Vec<Submission>> {
        let url = format!(
            "{}?include[]=rubric_assessment&{}",
            paths::submissions(course_id, assignment_id),
            PER_PAGE
        );
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn assignment_groups(&self, course_id: u64) -> Result<Vec<AssignmentGroup>> {
        let url = format!("{}?{}", paths::assignment_groups(course_id), PER_PAGE);
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn group_assignments(&self, course_id: u64, group_id: u64) -> Result<Vec<Assignment>> {
        let url = format!("{}?{}", paths::group_assignments(course_id, group_id), PER_PAGE);
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn custom_columns(&self, course_id: u64) -> Result<Vec<CustomColumn>> {
        let url = format!("{}?{}", paths::custom_columns(course_id), PER_PAGE);
        Ok(self.reader().read_all(&url).await?)
    }

    pub async fn create_custom_column(&self, course_id: u64, title: &str) -> Result<CustomColumn> {
        let target = RequestTarget::form(
            HttpMethod::POST,
            paths::custom_columns(course_id),
            [("column[title]", title)],
        );
        let response = self.write("creating custom column", &target).await?;
        info!(course_id, title, "Created custom column");
        Ok(response.json()?)
    }

    pub async fn delete_custom_column(&self, course_id: u64, column_id: u64) -> Result<()> {
        let target = RequestTarget::delete(paths::custom_column(course_id, column_id));
        self.write("deleting custom column", &target).await?;
        info!(course_id, column_id, "Deleted custom column");
        Ok(())
    }

    /// Create a published, no-submission assignment
    pub async fn create_assignment(
        &self,
        course_id: u64,
        assignment: &NewAssignment,
    ) -> Result<Assignment> {
        let target = RequestTarget::form(
            HttpMethod::POST,
            paths::assignments(course_id),
            [
                ("assignment[name]", assignment.name.clone()),
                ("assignment[submission_types][]", "none".to_string()),
                (
                    "assignment[points_possible]",
                    format_number(assignment.points_possible),
                ),
                (
                    "assignment[assignment_group_id]",
                    assignment.assignment_group_id.to_string(),
                ),
                ("assignment[published]", "true".to_string()),
            ],
        );
        let response = self.write("creating assignment", &target).await?;
        let created: Assignment = response.json()?;
        info!(course_id, assignment_id = created.id, name = %created.name, "Created assignment");
        Ok(created)
    }

    /// Replace an assignment's dates and overrides with a JSON body
    pub async fn update_assignment(
        &self,
        course_id: u64,
        assignment_id: u64,
        body: Value,
    ) -> Result<()> {
        let target = RequestTarget::json(
            HttpMethod::PUT,
            paths::assignment(course_id, assignment_id),
            body,
        );
        self.write("updating assignment", &target).await?;
        Ok(())
    }

    /// Set whether grades for an assignment must be posted manually
    pub async fn set_post_policy(&self, assignment_id: u64, post_manually: bool) -> Result<()> {
        let body = json!({
            "operationName": "SetAssignmentPostPolicy",
            "variables": {
                "assignmentId": assignment_id.to_string(),
                "postManually": post_manually,
            },
            "query": SET_POST_POLICY,
        });
        let target = RequestTarget::json(HttpMethod::POST, paths::GRAPHQL, body);
        let response = self.write("muting assignment", &target).await?;

        let reply: Value = response.json()?;
        let errors = reply
            .pointer("/data/setAssignmentPostPolicy/errors")
            .and_then(Value::as_array)
            .filter(|errors| !errors.is_empty())
            .or_else(|| reply.get("errors").and_then(Value::as_array))
            .filter(|errors| !errors.is_empty());
        if let Some(errors) = errors {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(BulkError::write(
                "muting assignment",
                paths::GRAPHQL,
                response.status,
                messages.join("; "),
            ));
        }
        debug!(assignment_id, post_manually, "Set post policy");
        Ok(())
    }

    /// Send one request outside of a dispatched batch
    async fn write(&self, action: &str, target: &RequestTarget) -> Result<TransportResponse> {
        let response = self.transport.execute(target).await?;
        if !response.is_success() {
            return Err(BulkError::write(
                action,
                target.url.clone(),
                response.status,
                response.reason,
            ));
        }
        Ok(response)
    }
}

/// Render a number the way Canvas form fields expect: no trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

//! Zoom attendance import
//!
//! Reads a Zoom participants export, matches attendees to active students by
//! login id, and grades an attendance assignment: full points for anyone who
//! attended at least the minimum minutes, zero for everyone else.

use super::{BulkContext, ImportPlan};
use crate::canvas::{Assignment, Enrollment, NewAssignment, Submission, format_number, paths};
use crate::core::dispatch::ProgressSink;
use crate::core::report::OutcomeReport;
use crate::core::request::{ErrorTemplate, HttpMethod, PendingRequest, RequestTarget};
use crate::core::transport::Transport;
use crate::core::validation::{Notice, ValidationError, enforce_request_cap};
use crate::utils::error::{BulkError, Result};
use std::collections::HashSet;
use tracing::{info, warn};

pub const UNKNOWN_DATE: &str = "Unknown Date";
const NEXT_STEP: &str = "manually enter the correct scores for these users";

/// One participant with a captured email address
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    /// Local part of the email address
    pub username: String,
    pub minutes: f64,
}

/// Parsed participants export
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSheet {
    /// Meeting date, or [`UNKNOWN_DATE`]
    pub date: String,
    pub attendees: Vec<Attendee>,
    pub notices: Vec<Notice>,
}

/// A student on the roster with the minutes they attended
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub user_id: u64,
    pub username: String,
    pub minutes: f64,
}

fn find_column(row: &[String], from: usize, needle: &str) -> Option<usize> {
    row.iter()
        .enumerate()
        .skip(from)
        .find(|(_, cell)| cell.to_lowercase().contains(needle))
        .map(|(i, _)| i)
}

/// Parse a participants export given as a raw grid.
///
/// The header is the first row whose first cell mentions `name`; its second
/// cell must mention `email` and a later one `duration`. A `start time` cell
/// in the first row supplies the meeting date from the row below it.
pub fn parse_attendance(grid: &[Vec<String>]) -> std::result::Result<AttendanceSheet, ValidationError> {
    let header_index = grid
        .iter()
        .position(|row| row.first().is_some_and(|c| c.to_lowercase().contains("name")))
        .ok_or(ValidationError::MissingAttendanceColumn("name"))?;
    let header = &grid[header_index];

    if !header.get(1).is_some_and(|c| c.to_lowercase().contains("email")) {
        return Err(ValidationError::MissingAttendanceColumn("email"));
    }
    let minutes_col = find_column(header, 2, "duration")
        .ok_or(ValidationError::MissingAttendanceColumn("duration"))?;

    let date = grid
        .first()
        .and_then(|first| find_column(first, 0, "start time"))
        .and_then(|col| grid.get(1).and_then(|row| row.get(col)))
        .map(|cell| cell.chars().take(10).collect::<String>())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let mut attendees = Vec::new();
    let mut emails = HashSet::new();
    let mut no_email = Vec::new();

    for row in &grid[header_index + 1..] {
        let email = row.get(1).map(|c| c.trim()).unwrap_or_default();
        if email.contains('@') {
            let username = email.split('@').next().unwrap_or_default().to_string();
            let minutes = row
                .get(minutes_col)
                .and_then(|m| m.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            attendees.push(Attendee { username, minutes });
            emails.insert(email.to_lowercase());
        } else if let Some(name) = row.first().filter(|n| !n.trim().is_empty()) {
            no_email.push(name.trim().to_string());
        }
    }

    if emails.len() < attendees.len() {
        return Err(ValidationError::DuplicateAttendees(attendees.len() - emails.len()));
    }

    let mut notices = Vec::new();
    if !no_email.is_empty() {
        notices.push(Notice::new(
            format!(
                "{} users will not be imported because their email was not captured by Zoom",
                no_email.len()
            ),
            no_email,
        ));
    }

    Ok(AttendanceSheet {
        date,
        attendees,
        notices,
    })
}

/// Every active student with their attended minutes (zero if absent), plus a
/// notice for attendees with no matching login id
pub fn match_roster(sheet: &AttendanceSheet, enrollments: &[Enrollment]) -> (Vec<RosterEntry>, Option<Notice>) {
    let mut matched = vec![false; sheet.attendees.len()];
    let mut roster = Vec::with_capacity(enrollments.len());

    for enrollment in enrollments {
        let login = enrollment.user.login_id.clone().unwrap_or_default();
        let found = sheet
            .attendees
            .iter()
            .position(|a| !login.is_empty() && a.username == login);
        let minutes = match found {
            Some(i) => {
                matched[i] = true;
                sheet.attendees[i].minutes
            }
            None => 0.0,
        };
        roster.push(RosterEntry {
            user_id: enrollment.user_id,
            username: login,
            minutes,
        });
    }

    let unmatched: Vec<String> = sheet
        .attendees
        .iter()
        .zip(&matched)
        .filter(|(_, m)| !**m)
        .map(|(a, _)| a.username.clone())
        .collect();
    let notice = (!unmatched.is_empty()).then(|| {
        Notice::new(
            format!(
                "{} users will not be imported because their username does not match an enrolled Canvas user",
                unmatched.len()
            ),
            unmatched,
        )
    });
    (roster, notice)
}

/// Form choices for the attendance assignment
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceOptions {
    /// Assignment name; defaults to the meeting date
    pub assignment_name: Option<String>,
    pub points: f64,
    pub group_id: u64,
    pub min_minutes: f64,
    /// Grade into an existing assignment with the same name
    pub overwrite: bool,
}

impl AttendanceOptions {
    pub fn new(group_id: u64) -> Self {
        Self {
            assignment_name: None,
            points: 1.0,
            group_id,
            min_minutes: 1.0,
            overwrite: false,
        }
    }
}

/// Where grades will go
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceTarget {
    Existing {
        assignment: Assignment,
        submissions: Vec<Submission>,
    },
    New(NewAssignment),
}

/// A checked attendance import, ready to confirm
#[derive(Debug, Clone, PartialEq)]
pub struct AttendancePlan {
    pub course_id: u64,
    pub roster: Vec<RosterEntry>,
    pub target: AttendanceTarget,
    pub min_minutes: f64,
    pub notices: Vec<Notice>,
    pub confirmation: String,
}

/// Users already scored above zero on the target assignment
fn already_present(existing: &[Submission]) -> HashSet<u64> {
    existing
        .iter()
        .filter(|s| s.score.is_some_and(|score| score > 0.0))
        .map(|s| s.user_id)
        .collect()
}

/// One grade request per roster entry that does not already have a positive score
pub fn build_grade_requests(
    course_id: u64,
    assignment: &Assignment,
    roster: &[RosterEntry],
    existing: &[Submission],
    min_minutes: f64,
) -> Vec<PendingRequest> {
    let present = already_present(existing);
    let points = assignment.points_possible.unwrap_or(0.0);

    roster
        .iter()
        .filter(|entry| !present.contains(&entry.user_id))
        .map(|entry| {
            let grade = if entry.minutes >= min_minutes { points } else { 0.0 };
            let url = paths::submission_by_user_id(course_id, assignment.id, entry.user_id);
            let error = ErrorTemplate::new(format!(
                "Failed to post score for student {} (id: {}) using endpoint {}. Response: ",
                entry.username, entry.user_id, url
            ));
            PendingRequest::new(
                RequestTarget::form(
                    HttpMethod::PUT,
                    url,
                    [("submission[posted_grade]", format_number(grade))],
                ),
                error,
            )
        })
        .collect()
}

/// Check everything that can be checked with reads only; nothing is written
/// until the returned plan is executed.
pub async fn plan_attendance_import<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    grid: &[Vec<String>],
    options: &AttendanceOptions,
) -> Result<AttendancePlan> {
    let sheet = parse_attendance(grid)?;
    let mut notices = sheet.notices.clone();

    let enrollments = ctx.api.active_student_enrollments(course_id).await?;
    let (roster, unmatched) = match_roster(&sheet, &enrollments);
    notices.extend(unmatched);

    let groups = ctx.api.assignment_groups(course_id).await?;
    if !groups.iter().any(|g| g.id == options.group_id) {
        return Err(BulkError::not_found(format!(
            "Course {} has no assignment group with id {}",
            course_id, options.group_id
        )));
    }

    let name = options
        .assignment_name
        .clone()
        .unwrap_or_else(|| sheet.date.clone());
    let existing = ctx
        .api
        .group_assignments(course_id, options.group_id)
        .await?
        .into_iter()
        .find(|a| a.name == name);

    let target = match existing {
        Some(assignment) => {
            if !options.overwrite {
                return Err(BulkError::conflict(format!(
                    "The assignment \"{}\" already exists. Pass --overwrite to add students present in this file to those already scored as present",
                    name
                )));
            }
            if assignment.points_possible != Some(options.points) {
                notices.push(Notice::new(
                    format!(
                        "When overwriting an assignment, the total assignment points will not be adjusted: it will remain at {}",
                        assignment.points_possible.map(format_number).unwrap_or_default()
                    ),
                    Vec::new(),
                ));
            }
            let submissions = ctx.api.submissions(course_id, assignment.id).await?;
            AttendanceTarget::Existing {
                assignment,
                submissions,
            }
        }
        None => AttendanceTarget::New(NewAssignment {
            name,
            points_possible: options.points,
            assignment_group_id: options.group_id,
        }),
    };

    let pending = match &target {
        AttendanceTarget::Existing { submissions, .. } => {
            let present = already_present(submissions);
            roster.iter().filter(|e| !present.contains(&e.user_id)).count()
        }
        AttendanceTarget::New(_) => roster.len(),
    };
    enforce_request_cap(pending, ctx.max_requests())?;

    let confirmation = match &target {
        AttendanceTarget::Existing { assignment, .. } => format!(
            "You are about to add attendance for {} students to the existing assignment \"{}\". Are you sure you wish to proceed?",
            pending, assignment.name
        ),
        AttendanceTarget::New(new) => format!(
            "You are about to create the assignment \"{}\" and post attendance for {} students. Are you sure you wish to proceed?",
            new.name, pending
        ),
    };

    Ok(AttendancePlan {
        course_id,
        roster,
        target,
        min_minutes: options.min_minutes,
        notices,
        confirmation,
    })
}

/// Create or reuse the assignment, hide its grades, and post every score
pub async fn execute_attendance_import<T: Transport>(
    ctx: &BulkContext<T>,
    plan: AttendancePlan,
    progress: &mut dyn ProgressSink,
) -> Result<OutcomeReport> {
    let (assignment, submissions) = match plan.target {
        AttendanceTarget::Existing {
            assignment,
            submissions,
        } => (assignment, submissions),
        AttendanceTarget::New(new) => (
            ctx.api.create_assignment(plan.course_id, &new).await?,
            Vec::new(),
        ),
    };

    if let Err(e) = ctx.api.set_post_policy(assignment.id, true).await {
        warn!(assignment_id = assignment.id, error = %e, "Could not mute attendance assignment");
        return Err(e);
    }
    info!(assignment_id = assignment.id, "Attendance assignment muted");

    let requests = build_grade_requests(
        plan.course_id,
        &assignment,
        &plan.roster,
        &submissions,
        plan.min_minutes,
    );
    let import = ImportPlan::new(requests, Vec::new(), "scores", ctx.max_requests())?
        .with_next_step(NEXT_STEP);

    let mut report = ctx.execute(&import, progress).await?;
    report.remote_changed = true;
    Ok(report)
}

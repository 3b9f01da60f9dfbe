//! Canvas API paths, relative to the instance base URL

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped when user data becomes a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const GRAPHQL: &str = "/api/graphql";

pub fn course(course_id: u64) -> String {
    format!("/api/v1/courses/{}", course_id)
}

pub fn assignments(course_id: u64) -> String {
    format!("{}/assignments", course(course_id))
}

pub fn assignment(course_id: u64, assignment_id: u64) -> String {
    format!("{}/{}", assignments(course_id), assignment_id)
}

pub fn submissions(course_id: u64, assignment_id: u64) -> String {
    format!("{}/submissions", assignment(course_id, assignment_id))
}

/// Submission addressed by SIS user id
pub fn submission_by_sis_id(course_id: u64, assignment_id: u64, sis_user_id: &str) -> String {
    format!(
        "{}/sis_user_id:{}",
        submissions(course_id, assignment_id),
        utf8_percent_encode(sis_user_id, PATH_SEGMENT)
    )
}

/// Submission addressed by Canvas user id
pub fn submission_by_user_id(course_id: u64, assignment_id: u64, user_id: u64) -> String {
    format!("{}/{}", submissions(course_id, assignment_id), user_id)
}

pub fn enrollments(course_id: u64) -> String {
    format!("{}/enrollments", course(course_id))
}

pub fn assignment_groups(course_id: u64) -> String {
    format!("{}/assignment_groups", course(course_id))
}

pub fn group_assignments(course_id: u64, group_id: u64) -> String {
    format!("{}/{}/assignments", assignment_groups(course_id), group_id)
}

pub fn custom_columns(course_id: u64) -> String {
    format!("{}/custom_gradebook_columns", course(course_id))
}

pub fn custom_column(course_id: u64, column_id: u64) -> String {
    format!("{}/{}", custom_columns(course_id), column_id)
}

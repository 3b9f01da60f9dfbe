//! Test fixtures

use serde_json::{Value, json};

/// Comment import CSV with `students` rows and one comment per cell
pub fn comment_csv(students: usize, assignment_ids: &[u64]) -> String {
    let mut csv = String::from("SIS User ID");
    for id in assignment_ids {
        csv.push_str(&format!(",Assignment {} ({})", id, id));
    }
    csv.push('\n');
    for s in 0..students {
        csv.push_str(&format!("sis{:03}", s));
        for id in assignment_ids {
            csv.push_str(&format!(",Comment for {} on {}", s, id));
        }
        csv.push('\n');
    }
    csv
}

pub fn enrollment(user_id: u64, name: &str, sis: &str, login: &str) -> Value {
    json!({
        "user_id": user_id,
        "type": "StudentEnrollment",
        "user": {
            "id": user_id,
            "name": name,
            "sis_user_id": sis,
            "login_id": login
        }
    })
}

/// Assignment with a two-criterion rubric
pub fn rubric_assignment(id: u64) -> Value {
    json!({
        "id": id,
        "name": "Lab Report",
        "points_possible": 10.0,
        "rubric": [
            {"id": "_101", "description": "Analysis", "points": 6.0},
            {"id": "_102", "description": "Clarity", "points": 4.0}
        ]
    })
}

//! Canvas resource models
//!
//! Only the fields the workflows read are modelled. Objects that must be
//! echoed back unchanged (assignment overrides, rubric assessments) stay as
//! JSON maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// IANA zone name, e.g. `America/Denver`
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RubricCriterion {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub assignment_group_id: Option<u64>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub unlock_at: Option<String>,
    #[serde(default)]
    pub lock_at: Option<String>,
    #[serde(default)]
    pub only_visible_to_overrides: bool,
    #[serde(default)]
    pub rubric: Option<Vec<RubricCriterion>>,
    #[serde(default)]
    pub overrides: Vec<Map<String, Value>>,
}

impl Assignment {
    pub fn rubric(&self) -> &[RubricCriterion] {
        self.rubric.as_deref().unwrap_or_default()
    }

    /// Criterion whose description matches exactly
    pub fn criterion_by_description(&self, description: &str) -> Option<&RubricCriterion> {
        self.rubric().iter().find(|c| c.description == description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sis_user_id: Option<String>,
    #[serde(default)]
    pub login_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub user_id: u64,
    #[serde(default, rename = "type")]
    pub enrollment_type: Option<String>,
    pub user: User,
}

/// One criterion's saved assessment: `points`, `rating_id`, `comments`, ...
pub type CriterionAssessment = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub user_id: u64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub attempt: Option<u32>,
    /// Criterion id → saved assessment
    #[serde(default)]
    pub rubric_assessment: Option<BTreeMap<String, CriterionAssessment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentGroup {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomColumn {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub hidden: bool,
}

/// Fields for a newly created assignment
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub name: String,
    pub points_possible: f64,
    pub assignment_group_id: u64,
}

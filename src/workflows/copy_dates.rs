//! Copy & offset assignment dates
//!
//! Copies the base dates, every override, and the "only visible to
//! overrides" flag from one assignment to another, shifting each date by a
//! number of days or weeks in the course's time zone.

use super::BulkContext;
use crate::canvas::Assignment;
use crate::core::transport::Transport;
use crate::utils::error::{BulkError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

pub const DATE_FIELDS: [&str; 3] = ["due_at", "unlock_at", "lock_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Days,
    Weeks,
}

impl FromStr for OffsetUnit {
    type Err = BulkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            other => Err(BulkError::invalid_input(format!(
                "Unknown offset unit '{}', expected days or weeks",
                other
            ))),
        }
    }
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days => f.write_str("days"),
            Self::Weeks => f.write_str("weeks"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOffset {
    pub amount: i64,
    pub unit: OffsetUnit,
}

impl DateOffset {
    pub fn new(amount: i64, unit: OffsetUnit) -> Self {
        Self { amount, unit }
    }

    pub fn days(&self) -> i64 {
        match self.unit {
            OffsetUnit::Days => self.amount,
            OffsetUnit::Weeks => self.amount * 7,
        }
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| BulkError::date(format!("Unknown course time zone '{}': {}", name, e)))
}

/// Shift an ISO 8601 timestamp by whole calendar days in `tz`, keeping the
/// local wall-clock time, and return it in UTC
pub fn shift_date(value: &str, tz: Tz, offset: DateOffset) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|e| BulkError::date(format!("Cannot parse date '{}': {}", value, e)))?;
    let local: NaiveDateTime = parsed.with_timezone(&tz).naive_local() + Duration::days(offset.days());

    let shifted = tz
        .from_local_datetime(&local)
        .earliest()
        // Wall-clock time skipped by a DST change: move past the gap
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .ok_or_else(|| BulkError::date(format!("Cannot represent {} in {}", local, tz)))?;

    Ok(shifted
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string())
}

fn shift_override(source: &Map<String, Value>, tz: Tz, offset: DateOffset) -> Result<Map<String, Value>> {
    let mut copy = source.clone();
    copy.remove("id");
    copy.remove("assignment_id");
    for field in DATE_FIELDS {
        match copy.get(field).and_then(Value::as_str).map(str::to_string) {
            Some(date) => {
                copy.insert(field.to_string(), Value::String(shift_date(&date, tz, offset)?));
            }
            None => {
                copy.remove(field);
            }
        }
    }
    Ok(copy)
}

/// JSON body for `PUT /assignments/:destination`
pub fn build_copy_body(source: &Assignment, tz: Tz, offset: DateOffset) -> Result<Value> {
    let mut assignment = Map::new();
    for (field, value) in [
        ("due_at", &source.due_at),
        ("unlock_at", &source.unlock_at),
        ("lock_at", &source.lock_at),
    ] {
        let shifted = match value {
            Some(date) => Value::String(shift_date(date, tz, offset)?),
            None => Value::Null,
        };
        assignment.insert(field.to_string(), shifted);
    }

    let overrides = source
        .overrides
        .iter()
        .map(|o| shift_override(o, tz, offset).map(Value::Object))
        .collect::<Result<Vec<_>>>()?;
    assignment.insert("assignment_overrides".to_string(), Value::Array(overrides));
    assignment.insert(
        "only_visible_to_overrides".to_string(),
        Value::Bool(source.only_visible_to_overrides),
    );

    Ok(json!({ "assignment": assignment }))
}

/// Prepared date copy, ready to confirm
#[derive(Debug, Clone, PartialEq)]
pub struct CopyDatesPlan {
    pub course_id: u64,
    pub source: Assignment,
    pub destination: Assignment,
    pub body: Value,
    pub confirmation: String,
}

pub async fn plan_copy_dates<T: Transport>(
    ctx: &BulkContext<T>,
    course_id: u64,
    source_id: u64,
    destination_id: u64,
    offset: DateOffset,
) -> Result<CopyDatesPlan> {
    if source_id == destination_id {
        return Err(BulkError::invalid_input(
            "Source and destination assignments must differ",
        ));
    }

    let course = ctx.api.course(course_id).await?;
    let tz = parse_time_zone(&course.time_zone)?;
    let source = ctx
        .api
        .assignment_with_overrides(course_id, source_id)
        .await?;
    let destination = ctx.api.assignment(course_id, destination_id).await?;

    let body = build_copy_body(&source, tz, offset)?;
    debug!(course_id, source_id, destination_id, time_zone = %tz, "Built date copy");

    let confirmation = format!(
        "Copy all \"Assign to\" options and dates from \"{}\" to \"{}\", offset by {} {}. This will overwrite ALL \"Assign to\" options and dates for \"{}\". Are you sure you wish to proceed?",
        source.name, destination.name, offset.amount, offset.unit, destination.name
    );
    Ok(CopyDatesPlan {
        course_id,
        source,
        destination,
        body,
        confirmation,
    })
}

pub async fn execute_copy_dates<T: Transport>(ctx: &BulkContext<T>, plan: CopyDatesPlan) -> Result<String> {
    ctx.api
        .update_assignment(plan.course_id, plan.destination.id, plan.body)
        .await?;
    info!(
        source_id = plan.source.id,
        destination_id = plan.destination.id,
        "Copied assignment dates"
    );
    Ok(format!(
        "Success! Dates copied from \"{}\" to \"{}\".",
        plan.source.name, plan.destination.name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::Payload;
    use crate::core::transport::{ScriptedTransport, TransportResponse};
    use crate::workflows::test_support::context;
    use tempfile::TempDir;

    fn denver() -> Tz {
        parse_time_zone("America/Denver").unwrap()
    }

    #[test]
    fn test_shift_by_days() {
        let shifted = shift_date("2024-01-10T06:59:59Z", denver(), DateOffset::new(3, OffsetUnit::Days)).unwrap();
        assert_eq!(shifted, "2024-01-13T06:59:59Z");
    }

    #[test]
    fn test_shift_across_dst_keeps_local_time() {
        // 23:59 MST on March 5th; one week later Denver is on MDT.
        let shifted = shift_date("2024-03-06T06:59:00Z", denver(), DateOffset::new(1, OffsetUnit::Weeks)).unwrap();
        assert_eq!(shifted, "2024-03-13T05:59:00Z");
    }

    #[test]
    fn test_negative_offset() {
        let shifted = shift_date("2024-05-20T12:00:00Z", Tz::UTC, DateOffset::new(-2, OffsetUnit::Weeks)).unwrap();
        assert_eq!(shifted, "2024-05-06T12:00:00Z");
    }

    #[test]
    fn test_bad_inputs() {
        assert!(parse_time_zone("Mars/Olympus").is_err());
        assert!(shift_date("tomorrow", Tz::UTC, DateOffset::new(1, OffsetUnit::Days)).is_err());
        assert!("fortnights".parse::<OffsetUnit>().is_err());
        assert_eq!("Weeks".parse::<OffsetUnit>().unwrap(), OffsetUnit::Weeks);
    }

    #[test]
    fn test_copy_body() {
        let source: Assignment = serde_json::from_value(json!({
            "id": 1,
            "name": "Homework 1",
            "due_at": "2024-01-10T06:59:59Z",
            "unlock_at": null,
            "only_visible_to_overrides": true,
            "overrides": [{
                "id": 900,
                "assignment_id": 1,
                "course_section_id": 33,
                "title": "Section 2",
                "due_at": "2024-01-12T06:59:59Z",
                "lock_at": null
            }]
        }))
        .unwrap();

        let body = build_copy_body(&source, denver(), DateOffset::new(1, OffsetUnit::Weeks)).unwrap();
        let assignment = &body["assignment"];
        assert_eq!(assignment["due_at"], "2024-01-17T06:59:59Z");
        assert_eq!(assignment["unlock_at"], Value::Null);
        assert_eq!(assignment["lock_at"], Value::Null);
        assert_eq!(assignment["only_visible_to_overrides"], true);

        let o = assignment["assignment_overrides"][0].as_object().unwrap();
        assert!(!o.contains_key("id"));
        assert!(!o.contains_key("assignment_id"));
        assert!(!o.contains_key("lock_at"));
        assert_eq!(o["due_at"], "2024-01-19T06:59:59Z");
        assert_eq!(o["course_section_id"], 33);
        assert_eq!(o["title"], "Section 2");
    }

    #[tokio::test]
    async fn test_same_source_and_destination_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = context(ScriptedTransport::always_ok(), dir.path());
        let err = plan_copy_dates(&ctx, 1, 5, 5, DateOffset::new(1, OffsetUnit::Days))
            .await
            .unwrap_err();
        assert!(matches!(err, BulkError::InvalidInput(_)));
        assert_eq!(ctx.api.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_plan_and_execute_copy() {
        let dir = TempDir::new().unwrap();
        let transport = ScriptedTransport::new(|target, _| {
            let body = match target.url.as_str() {
                "/api/v1/courses/1" => json!({"id": 1, "time_zone": "America/Denver"}),
                "/api/v1/courses/1/assignments/5?include[]=overrides&override_assignment_dates=false" => {
                    json!({"id": 5, "name": "Week 1", "due_at": "2024-01-10T06:59:59Z"})
                }
                "/api/v1/courses/1/assignments/6" => json!({"id": 6, "name": "Week 2"}),
                other => panic!("unexpected url {}", other),
            };
            Ok(TransportResponse::ok(body.to_string()))
        });
        let ctx = context(transport, dir.path());

        let plan = plan_copy_dates(&ctx, 1, 5, 6, DateOffset::new(1, OffsetUnit::Weeks))
            .await
            .unwrap();
        assert!(plan.confirmation.contains("\"Week 2\""));

        let message = execute_copy_dates(&ctx, plan).await.unwrap();
        assert!(message.starts_with("Success!"));

        let calls = ctx.api.transport().calls();
        let put = calls.last().unwrap();
        assert_eq!(put.target.url, "/api/v1/courses/1/assignments/6");
        match &put.target.payload {
            Payload::Json(body) => assert_eq!(body["assignment"]["due_at"], "2024-01-17T06:59:59Z"),
            other => panic!("expected JSON payload, got {:?}", other),
        }
    }
}

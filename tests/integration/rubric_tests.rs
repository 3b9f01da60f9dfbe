//! Rubric export followed by re-import

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::MockCanvas;
    use crate::common::fixtures::{enrollment, rubric_assignment};
    use canvas_bulk::core::report::OutcomeKind;
    use canvas_bulk::core::table::Table;
    use canvas_bulk::workflows::rubric_export::export_rubric_scores;
    use canvas_bulk::workflows::rubric_import::plan_rubric_import;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, ResponseTemplate};

    async fn mount_course(canvas: &MockCanvas) {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1/assignments/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rubric_assignment(7)))
            .mount(&canvas.server)
            .await;
        canvas
            .mount_page(
                "/api/v1/courses/1/enrollments",
                1,
                json!([
                    enrollment(1, "Ada Lovelace", "sis1", "ada"),
                    enrollment(2, "Grace Hopper", "sis2", "grace")
                ]),
                None,
            )
            .await;
        canvas
            .mount_page(
                "/api/v1/courses/1/assignments/7/submissions",
                1,
                json!([
                    {
                        "user_id": 1,
                        "score": 8.0,
                        "attempt": 1,
                        "rubric_assessment": {
                            "_101": {"points": 5.0, "rating_id": "r5", "comments": "Solid"},
                            "_102": {"points": 3.0}
                        }
                    },
                    {"user_id": 2, "score": null, "attempt": null},
                    {"user_id": 99, "score": 1.0, "attempt": 1}
                ]),
                None,
            )
            .await;
    }

    #[tokio::test]
    async fn test_export_then_import_edited_scores() {
        let canvas = MockCanvas::start().await;
        mount_course(&canvas).await;
        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());

        let summary = assert_ok!(export_rubric_scores(&ctx, 1, 7).await);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.missing_users, 1);
        assert_eq!(summary.path, dir.path().join("Rubric Scores Lab Report.csv"));

        let exported = std::fs::read_to_string(&summary.path).unwrap();
        let mut lines = exported.lines();
        assert_eq!(
            lines.next(),
            Some("Student Name,Student ID,Posted Score,Attempt Number,Points: Analysis,Points: Clarity")
        );
        assert_eq!(lines.next(), Some("Ada Lovelace,sis1,8,1,5,3"));
        assert_eq!(lines.next(), Some("Grace Hopper,sis2,,,,"));
        assert_eq!(lines.next(), Some("Error: Could not find user 99"));

        // Give Ada a higher analysis score and leave Grace blank.
        let edited = exported.replace("Ada Lovelace,sis1,8,1,5,3", "Ada Lovelace,sis1,8,1,6,3");
        let table = assert_ok!(Table::from_reader(edited.as_bytes()));

        Mock::given(method("PUT"))
            .and(path("/api/v1/courses/1/assignments/7/submissions/sis_user_id:sis1"))
            .and(body_string_contains("rubric_assessment%5B_101%5D%5Bpoints%5D=6"))
            .and(body_string_contains("rubric_assessment%5B_101%5D%5Brating_id%5D=r5"))
            .and(body_string_contains("rubric_assessment%5B_102%5D%5Bcomments%5D="))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&canvas.server)
            .await;

        let plan = assert_ok!(plan_rubric_import(&ctx, 1, 7, &table).await);
        assert_eq!(plan.len(), 1);
        assert!(!plan.notices.is_empty());

        let report = assert_ok!(ctx.execute(&plan, &mut |_: f64| {}).await);
        assert_eq!(report.kind, OutcomeKind::AllSucceeded);
        assert_eq!(report.message, "All rubric scores imported successfully!");
    }
}

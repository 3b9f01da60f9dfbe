//! Comment import over HTTP

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::MockCanvas;
    use crate::common::fixtures::comment_csv;
    use canvas_bulk::core::report::OutcomeKind;
    use canvas_bulk::core::table::Table;
    use canvas_bulk::workflows::comments::plan_comment_import;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
    use wiremock::{Mock, ResponseTemplate};

    async fn mount_comment_endpoint(canvas: &MockCanvas, expected: u64) {
        Mock::given(method("PUT"))
            .and(path_regex(
                r"^/api/v1/courses/1/assignments/111/submissions/sis_user_id:sis\d{3}$",
            ))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("comment%5Btext_comment%5D="))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(expected)
            .mount(&canvas.server)
            .await;
    }

    #[tokio::test]
    async fn test_posts_every_comment_and_reports_progress() {
        let canvas = MockCanvas::start().await;
        mount_comment_endpoint(&canvas, 25).await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let table = assert_ok!(Table::from_reader(comment_csv(25, &[111]).as_bytes()));
        let plan = assert_ok!(plan_comment_import(&ctx, 1, &table));
        assert_eq!(plan.len(), 25);
        assert!(plan.confirmation.starts_with("You are about to post 25 comments."));

        let mut progress = Vec::new();
        let report = assert_ok!(ctx.execute(&plan, &mut |p: f64| progress.push(p)).await);

        assert_eq!(progress, vec![0.0, 40.0, 80.0, 100.0]);
        assert_eq!(report.kind, OutcomeKind::AllSucceeded);
        assert_eq!(report.message, "All comments imported successfully!");
        assert!(!dir.path().join("errors.txt").exists());

        let requests = canvas.requests().await;
        let first = requests
            .iter()
            .find(|r| r.url.path().ends_with("sis_user_id:sis000"))
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&first.body),
            "comment%5Btext_comment%5D=Comment+for+0+on+111"
        );
    }

    #[tokio::test]
    async fn test_failed_comments_are_logged() {
        let canvas = MockCanvas::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/courses/1/assignments/111/submissions/sis_user_id:sis003"))
            .respond_with(ResponseTemplate::new(404))
            .with_priority(1)
            .expect(1)
            .mount(&canvas.server)
            .await;
        mount_comment_endpoint(&canvas, 4).await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let table = assert_ok!(Table::from_reader(comment_csv(5, &[111]).as_bytes()));
        let plan = assert_ok!(plan_comment_import(&ctx, 1, &table));
        let report = assert_ok!(ctx.execute(&plan, &mut |_: f64| {}).await);

        assert_eq!(report.kind, OutcomeKind::PartialFailure);
        assert_eq!(report.failed, 1);
        assert!(report.message.contains("1 of 5 comments failed to import"));

        let log = std::fs::read_to_string(dir.path().join("errors.txt")).unwrap();
        assert_eq!(
            log.trim_end(),
            "Failed to post comment for student sis003 and assignment Assignment 111 (111) using endpoint /api/v1/courses/1/assignments/111/submissions/sis_user_id:sis003. Response: 404 - Not Found"
        );
    }
}

//! Server error retries

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::MockCanvas;
    use canvas_bulk::core::report::OutcomeKind;
    use canvas_bulk::core::table::Table;
    use canvas_bulk::workflows::comments::plan_comment_import;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const CSV: &str = "SIS User ID,Quiz 1 (111)\nabc123,Nice work\n";
    const ENDPOINT: &str = "/api/v1/courses/1/assignments/111/submissions/sis_user_id:abc123";

    #[tokio::test]
    async fn test_server_error_is_retried_once() {
        let canvas = MockCanvas::start().await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&canvas.server)
            .await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&canvas.server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let table = assert_ok!(Table::from_reader(CSV.as_bytes()));
        let plan = assert_ok!(plan_comment_import(&ctx, 1, &table));
        let report = assert_ok!(ctx.execute(&plan, &mut |_: f64| {}).await);

        assert_eq!(report.kind, OutcomeKind::AllSucceeded);
        assert_eq!(canvas.requests().await.len(), 2);
        assert!(!dir.path().join("errors.txt").exists());
    }

    #[tokio::test]
    async fn test_persistent_server_error_is_logged() {
        let canvas = MockCanvas::start().await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&canvas.server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let table = assert_ok!(Table::from_reader(CSV.as_bytes()));
        let plan = assert_ok!(plan_comment_import(&ctx, 1, &table));
        let report = assert_ok!(ctx.execute(&plan, &mut |_: f64| {}).await);

        assert_eq!(report.kind, OutcomeKind::TotalFailure);
        assert!(report.message.starts_with("Import failed."));
        let log = std::fs::read_to_string(dir.path().join("errors.txt")).unwrap();
        assert!(log.trim_end().ends_with("Response: 500 - Internal Server Error"));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let canvas = MockCanvas::start().await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&canvas.server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let table = assert_ok!(Table::from_reader(CSV.as_bytes()));
        let plan = assert_ok!(plan_comment_import(&ctx, 1, &table));
        let report = assert_ok!(ctx.execute(&plan, &mut |_: f64| {}).await);
        assert_eq!(report.failed, 1);
    }
}

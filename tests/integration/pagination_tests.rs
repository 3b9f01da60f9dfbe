//! Paginated reads and prerequisite read failures

#[cfg(test)]
mod tests {
    use crate::common::MockCanvas;
    use crate::common::fixtures::enrollment;
    use crate::{assert_err, assert_ok};
    use canvas_bulk::BulkError;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const ENROLLMENTS: &str = "/api/v1/courses/1/enrollments";

    #[tokio::test]
    async fn test_reads_every_page_in_order() {
        let canvas = MockCanvas::start().await;
        canvas
            .mount_page(
                ENROLLMENTS,
                1,
                json!([
                    enrollment(1, "Ada", "sis1", "ada"),
                    enrollment(2, "Grace", "sis2", "grace")
                ]),
                Some(2),
            )
            .await;
        canvas
            .mount_page(ENROLLMENTS, 2, json!([enrollment(3, "Alan", "sis3", "alan")]), Some(3))
            .await;
        canvas.mount_page(ENROLLMENTS, 3, json!([]), None).await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let enrollments = assert_ok!(ctx.api.enrollments(1).await);

        let ids: Vec<u64> = enrollments.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(canvas.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn test_single_page_without_link() {
        let canvas = MockCanvas::start().await;
        canvas
            .mount_page(ENROLLMENTS, 1, json!([enrollment(1, "Ada", "sis1", "ada")]), None)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let enrollments = assert_ok!(ctx.api.enrollments(1).await);
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].user.login_id.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn test_failed_read_names_status_and_url() {
        let canvas = MockCanvas::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&canvas.server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let err = assert_err!(ctx.api.course(1).await);

        assert!(matches!(err, BulkError::Read(_)));
        assert_eq!(
            err.to_string(),
            "ERROR 401 while retrieving data from Canvas (/api/v1/courses/1): Unauthorized"
        );
    }

    #[tokio::test]
    async fn test_failure_on_later_page_fails_whole_read() {
        let canvas = MockCanvas::start().await;
        canvas
            .mount_page(ENROLLMENTS, 1, json!([enrollment(1, "Ada", "sis1", "ada")]), Some(2))
            .await;
        Mock::given(method("GET"))
            .and(path(ENROLLMENTS))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503))
            .with_priority(1)
            .mount(&canvas.server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = canvas.context(dir.path());
        let err = assert_err!(ctx.api.enrollments(1).await);
        assert!(err.to_string().starts_with("ERROR 503"));
    }
}

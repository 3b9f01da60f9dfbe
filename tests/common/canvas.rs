//! Mock Canvas instance

use canvas_bulk::config::{BulkConfig, CanvasConfig, Config};
use canvas_bulk::core::transport::HttpTransport;
use canvas_bulk::workflows::BulkContext;
use serde_json::Value;
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

pub struct MockCanvas {
    pub server: MockServer,
}

impl MockCanvas {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Configuration pointing at this server with no chunk delay
    pub fn config(&self, output_dir: &Path) -> Config {
        let mut bulk = BulkConfig {
            canvas: CanvasConfig {
                base_url: self.uri(),
                access_token: Some(TEST_TOKEN.to_string()),
                ..CanvasConfig::default()
            },
            ..BulkConfig::default()
        };
        bulk.dispatch.chunk_delay_ms = 0;
        bulk.report.output_dir = output_dir.to_path_buf();
        Config { bulk }
    }

    pub fn context(&self, output_dir: &Path) -> BulkContext<HttpTransport> {
        let config = self.config(output_dir);
        assert!(config.validate().is_ok());
        match BulkContext::from_config(&config) {
            Ok(ctx) => ctx,
            Err(e) => panic!("Failed to build context: {}", e),
        }
    }

    /// Serve one page of a collection; `next_page` adds a `rel="next"` link
    pub async fn mount_page(&self, route: &str, page: u32, body: Value, next_page: Option<u32>) {
        let mut response = ResponseTemplate::new(200).set_body_json(body);
        if let Some(next) = next_page {
            response = response.insert_header(
                "Link",
                format!(
                    "<{}{}?page={}&per_page=100>; rel=\"next\", <{}{}?page=1&per_page=100>; rel=\"first\"",
                    self.uri(),
                    route,
                    next,
                    self.uri(),
                    route
                )
                .as_str(),
            );
        }

        let mock = Mock::given(method("GET"))
            .and(path(route))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()));
        // Pages addressed explicitly win over the unnumbered first request
        let mock = if page > 1 {
            mock.and(query_param("page", page.to_string().as_str()))
                .respond_with(response)
                .with_priority(1)
        } else {
            mock.respond_with(response).with_priority(5)
        };
        mock.mount(&self.server).await;
    }

    /// Every request the server has seen, in arrival order
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

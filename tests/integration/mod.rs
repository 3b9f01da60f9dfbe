//! Integration tests for canvas-bulk
//!
//! Each test runs a workflow over real HTTP against a `wiremock` server
//! standing in for Canvas.

pub mod comment_import_tests;
pub mod pagination_tests;
pub mod retry_tests;
pub mod rubric_tests;

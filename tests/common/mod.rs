//! Common test utilities for canvas-bulk
//!
//! ```rust,ignore
//! use crate::common::{canvas::MockCanvas, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let canvas = MockCanvas::start().await;
//!     let dir = tempfile::TempDir::new().unwrap();
//!     let ctx = canvas.context(dir.path());
//!     // ...
//! }
//! ```

pub mod canvas;
pub mod fixtures;

pub use canvas::{MockCanvas, TEST_TOKEN};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

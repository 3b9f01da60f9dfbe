//! Paginated collection reads
//!
//! Canvas splits collections across pages linked by `rel="next"` in the
//! `Link` response header.

mod link;
mod reader;

pub use link::next_link;
pub use reader::{PaginatedReader, ReadError, fetch_json};

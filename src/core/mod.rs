//! Core bulk request pipeline
//!
//! Spreadsheet rows flow through the pipeline leaf-first:
//! [`table`] → [`validation`] → [`request`] → [`dispatch`] → [`report`],
//! with [`pagination`] supplying existing remote state and [`transport`]
//! carrying every HTTP exchange.

pub mod dispatch;
pub mod pagination;
pub mod report;
pub mod request;
pub mod table;
pub mod transport;
pub mod validation;

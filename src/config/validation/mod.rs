//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: validators for each configuration section

mod config_validators;
mod trait_def;

pub use trait_def::Validate;

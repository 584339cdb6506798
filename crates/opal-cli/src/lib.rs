//! CLI library components for the Opal conversion tools.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;

//! CLI command implementations.

pub mod alerts;
pub mod analyze;
pub mod calendar;
pub mod daily;
pub mod export;
pub mod load;
pub mod projects;

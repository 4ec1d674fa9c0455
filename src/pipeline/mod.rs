//! Ranking pipeline: configuration, validation, stage traits and the runner.

pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;

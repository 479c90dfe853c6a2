// Utility functions module
pub mod activity;
pub mod config;
pub mod formatters;
pub mod metrics;
pub mod streak;

// Data models
pub mod entry;
pub mod query;
pub mod snapshot;

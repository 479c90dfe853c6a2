// Snapshot data access
pub mod snapshots;

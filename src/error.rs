// Error types for snapshot loading and leaderboard queries

use std::path::PathBuf;

use thiserror::Error;

use crate::models::snapshot::Period;

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The snapshot file for a period does not exist.
    #[error("leaderboard data not found for {period} ({})", .path.display())]
    DataNotFound { period: Period, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry that cannot take part in ordering.
    #[error("malformed entry at position {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("unknown period: {0}")]
    UnknownPeriod(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

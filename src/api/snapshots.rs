// Snapshot loader
// Reads `<data_dir>/<period>.json` files written by the aggregation job

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::features::activity_feed::{group_recent_activities, RecentWindows};
use crate::models::snapshot::{ActivityGroup, LeaderboardSnapshot, Period};

/// Read-only access to the snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, period: Period) -> PathBuf {
        self.data_dir.join(format!("{}.json", period.as_str()))
    }

    /// Load a period's snapshot. A missing file is `DataNotFound`.
    pub async fn load(&self, period: Period) -> Result<LeaderboardSnapshot> {
        let path = self.path_for(period);
        debug!("Loading snapshot {}", path.display());

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DashboardError::DataNotFound { period, path });
            }
            Err(source) => return Err(DashboardError::Io { path, source }),
        };

        let snapshot: LeaderboardSnapshot = serde_json::from_str(&content)
            .map_err(|source| DashboardError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} entries for {}",
            snapshot.entries.len(),
            period
        );
        Ok(snapshot)
    }

    /// Activity groups for the feed. A missing snapshot just means no activity.
    pub async fn load_recent(&self, period: Period) -> Result<Vec<ActivityGroup>> {
        match self.load(period).await {
            Ok(snapshot) => Ok(group_recent_activities(&snapshot)),
            Err(DashboardError::DataNotFound { path, .. }) => {
                warn!("No snapshot at {}, treating as empty", path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// All windows the home page needs, loaded concurrently
    pub async fn load_recent_windows(&self) -> Result<RecentWindows> {
        let periods = [
            Period::Week,
            Period::TwoWeeks,
            Period::ThreeWeeks,
            Period::Month,
            Period::TwoMonths,
        ];

        let mut loaded = join_all(periods.iter().map(|&p| self.load_recent(p)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let mut next = || loaded.next().unwrap_or_default();
        Ok(RecentWindows {
            week: next(),
            two_weeks: next(),
            three_weeks: next(),
            month: next(),
            two_months: next(),
        })
    }

    /// `updatedAt` of the weekly snapshot, if there is one
    pub async fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self.load(Period::Week).await {
            Ok(snapshot) => snapshot.updated_at,
            Err(e) => {
                debug!("No update time available: {}", e);
                None
            }
        }
    }
}

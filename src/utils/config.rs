// Centralized configuration for the dashboard

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::models::snapshot::Period;

/// Page sizes the leaderboard accepts for `limit`; anything else means "all"
pub const ALLOWED_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Activity names the sort options and distribution widget read
pub mod activities {
    pub const PR_OPENED: &str = "PR opened";
    pub const PR_MERGED: &str = "PR merged";
    pub const ISSUE_OPENED: &str = "Issue opened";
    pub const REVIEW_SUBMITTED: &str = "Review submitted";
}

/// Contributors shown in the home page avatar cloud
pub const ACTIVE_CONTRIBUTOR_DISPLAY_CAP: usize = 30;

/// Recent contributions listed on a profile
pub const PROFILE_RECENT_LIMIT: usize = 15;

/// Items per recent-activity section on the home page
pub const FEED_ITEMS_PER_PAGE: usize = 10;

pub const DEFAULT_DATA_DIR: &str = "public/leaderboard";

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_period: Period,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_period: Period::Week,
        }
    }
}

impl Config {
    /// Read `LEADERBOARD_DATA_DIR` and `LEADERBOARD_DEFAULT_PERIOD`
    pub fn from_env() -> Self {
        let data_dir = env::var("LEADERBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let default_period = match env::var("LEADERBOARD_DEFAULT_PERIOD") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring LEADERBOARD_DEFAULT_PERIOD: {}", e);
                Period::Week
            }),
            Err(_) => Period::Week,
        };

        Self {
            data_dir,
            default_period,
        }
    }
}

/// Today's calendar date in local time
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

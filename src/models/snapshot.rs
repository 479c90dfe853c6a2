// Snapshot data model
// One JSON document per reporting period, written by the aggregation job

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::entry::{null_as_default, ContributorEntry};
use crate::error::DashboardError;

/// Reporting period (and the intermediate windows used for deltas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "2week")]
    TwoWeeks,
    #[serde(rename = "3week")]
    ThreeWeeks,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "2month")]
    TwoMonths,
    #[serde(rename = "year")]
    Year,
}

impl Period {
    /// Periods that have their own leaderboard page
    pub const LEADERBOARD: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    /// File stem of the snapshot, e.g. `2week` for `2week.json`
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::TwoWeeks => "2week",
            Period::ThreeWeeks => "3week",
            Period::Month => "month",
            Period::TwoMonths => "2month",
            Period::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Weekly",
            Period::TwoWeeks => "Last 2 weeks",
            Period::ThreeWeeks => "Last 3 weeks",
            Period::Month => "Monthly",
            Period::TwoMonths => "Last 2 months",
            Period::Year => "Yearly",
        }
    }

    pub fn is_leaderboard(&self) -> bool {
        Self::LEADERBOARD.contains(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" => Ok(Period::Week),
            "2week" => Ok(Period::TwoWeeks),
            "3week" => Ok(Period::ThreeWeeks),
            "month" | "monthly" => Ok(Period::Month),
            "2month" => Ok(Period::TwoMonths),
            "year" | "yearly" => Ok(Period::Year),
            _ => Err(DashboardError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Sidebar row: a top contributor for one activity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopContributor {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Top contributors keyed by activity name
pub type TopByActivity = BTreeMap<String, Vec<TopContributor>>;

/// Full leaderboard snapshot for one period
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaderboardSnapshot {
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(
        rename = "updatedAt",
        default,
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<ContributorEntry>,
    #[serde(rename = "topByActivity", default, deserialize_with = "null_as_default")]
    pub top_by_activity: TopByActivity,
    #[serde(rename = "hiddenRoles", default, deserialize_with = "null_as_default")]
    pub hidden_roles: Vec<String>,
}

/// Feed item: one contribution tagged with its contributor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub slug: String,
    pub contributor: String,
    pub contributor_name: Option<String>,
    pub contributor_avatar_url: Option<String>,
    pub contributor_role: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub points: u64,
}

/// Feed section: all recent contributions of one activity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityGroup {
    pub activity_definition: String,
    pub activity_name: String,
    pub activity_description: Option<String>,
    pub activities: Vec<ActivityItem>,
}

// Contributor entry data model
// Matches the per-contributor records inside a leaderboard snapshot

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List where unreadable items are dropped instead of failing the whole document.
/// `null` reads as an empty list.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Vec<serde_json::Value> = null_as_default(deserializer)?;
    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if items.len() < total {
        debug!("Skipped {} unreadable records", total - items.len());
    }
    Ok(items)
}

/// Count/points pair for one activity type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ActivityStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
}

/// One active calendar day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// A single recorded contribution (PR, issue, review...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "occured_at")]
    pub occurred_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
}

/// One contributor's aggregated stats for a reporting period
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContributorEntry {
    pub username: String,
    #[serde(rename = "name", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_points: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_breakdown: HashMap<String, ActivityStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_activity: Vec<DailyActivity>,
    /// Records missing a type or timestamp are skipped
    #[serde(default, deserialize_with = "skip_invalid")]
    pub activities: Vec<ActivityRecord>,
}

impl ContributorEntry {
    /// Create an entry with only identity, role and points set
    pub fn new(username: &str, role: Option<&str>, total_points: u64) -> Self {
        Self {
            username: username.to_string(),
            role: role.map(|s| s.to_string()),
            total_points,
            ..Default::default()
        }
    }

    /// Display name, falling back to the username
    pub fn name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }

    /// Count for an activity type, 0 when absent
    pub fn activity_count(&self, activity: &str) -> u64 {
        self.activity_breakdown
            .get(activity)
            .map(|s| s.count)
            .unwrap_or(0)
    }

    /// Role, treating an empty string as unset
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.is_empty())
    }
}

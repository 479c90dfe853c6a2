// Per-contributor profile statistics

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::entry::{ActivityRecord, ActivityStats, ContributorEntry};
use crate::utils::activity::sort_breakdown_by_points;
use crate::utils::config::PROFILE_RECENT_LIMIT;
use crate::utils::metrics::average_per_day;
use crate::utils::streak::{calculate_streak, StreakResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ContributorStats<'a> {
    pub display_name: &'a str,
    pub username: &'a str,
    pub total_points: u64,
    /// Highest points first
    pub breakdown: Vec<(&'a str, ActivityStats)>,
    /// Largest points value in `breakdown`, for bar scaling
    pub max_points: u64,
    pub active_days: usize,
    pub average_points_per_day: u64,
    pub streak: StreakResult,
    pub month_points: u64,
    pub month_active_days: usize,
    /// Newest first
    pub recent: Vec<&'a ActivityRecord>,
}

impl<'a> ContributorStats<'a> {
    pub fn compute(entry: &'a ContributorEntry, today: NaiveDate) -> Self {
        let breakdown = sort_breakdown_by_points(&entry.activity_breakdown);
        let max_points = breakdown.iter().map(|(_, s)| s.points).max().unwrap_or(0);

        let active_days = entry
            .daily_activity
            .iter()
            .map(|d| d.date)
            .collect::<BTreeSet<_>>()
            .len();

        // One row per date; repeated dates keep the first row
        let mut this_month: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for day in entry
            .daily_activity
            .iter()
            .filter(|d| d.date.year() == today.year() && d.date.month() == today.month())
        {
            this_month.entry(day.date).or_insert(day.points);
        }
        let month_points: u64 = this_month.values().sum();
        let month_active_days = this_month.len();

        let mut recent: Vec<_> = entry.activities.iter().collect();
        recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        recent.truncate(PROFILE_RECENT_LIMIT);

        Self {
            display_name: entry.name(),
            username: &entry.username,
            total_points: entry.total_points,
            breakdown,
            max_points,
            active_days,
            average_points_per_day: average_per_day(entry.total_points, active_days),
            streak: calculate_streak(&entry.daily_activity, today),
            month_points,
            month_active_days,
            recent,
        }
    }
}

/// Look a contributor up by username
pub fn find_contributor<'a>(
    entries: &'a [ContributorEntry],
    username: &str,
) -> Option<&'a ContributorEntry> {
    entries
        .iter()
        .find(|e| e.username.eq_ignore_ascii_case(username))
}

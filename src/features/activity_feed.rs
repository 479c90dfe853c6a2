// Recent activity feed and home page summary widgets

use std::collections::{HashMap, HashSet};

use crate::models::snapshot::{ActivityGroup, ActivityItem, LeaderboardSnapshot};
use crate::utils::config::{activities, ACTIVE_CONTRIBUTOR_DISPLAY_CAP};
use crate::utils::metrics::{percentage, wow_change, WeeklyTotals};

/// Flatten every contributor's activity records into per-type groups.
/// Groups keep first-seen order; items within a group are newest first.
pub fn group_recent_activities(snapshot: &LeaderboardSnapshot) -> Vec<ActivityGroup> {
    let mut groups: Vec<ActivityGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in &snapshot.entries {
        for record in &entry.activities {
            let slot = *index.entry(record.kind.clone()).or_insert_with(|| {
                groups.push(ActivityGroup {
                    activity_definition: record.kind.clone(),
                    activity_name: record.kind.clone(),
                    activity_description: None,
                    activities: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            let position = group.activities.len();
            group.activities.push(ActivityItem {
                slug: format!(
                    "{}-{}-{}-{}",
                    entry.username,
                    record.kind,
                    record.occurred_at.to_rfc3339(),
                    position
                ),
                contributor: entry.username.clone(),
                contributor_name: entry.display_name.clone(),
                contributor_avatar_url: entry.avatar_url.clone(),
                contributor_role: entry.role.clone(),
                occurred_at: record.occurred_at,
                closed_at: record.occurred_at,
                title: record.title.clone(),
                link: record.link.clone(),
                points: record.points,
            });
        }
    }

    for group in &mut groups {
        group
            .activities
            .sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    }

    groups
}

pub fn total_activity_count(groups: &[ActivityGroup]) -> u64 {
    groups.iter().map(|g| g.activities.len() as u64).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorRef {
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Distinct contributors across all groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveContributors {
    /// First-seen order
    pub contributors: Vec<ContributorRef>,
    /// How many are left out of the display cap
    pub overflow: usize,
}

impl ActiveContributors {
    pub fn count(&self) -> usize {
        self.contributors.len()
    }

    pub fn displayed(&self) -> &[ContributorRef] {
        let shown = self.contributors.len().min(ACTIVE_CONTRIBUTOR_DISPLAY_CAP);
        &self.contributors[..shown]
    }
}

pub fn active_contributors(groups: &[ActivityGroup]) -> ActiveContributors {
    let mut seen = HashSet::new();
    let contributors: Vec<ContributorRef> = groups
        .iter()
        .flat_map(|g| g.activities.iter())
        .filter(|a| seen.insert(a.contributor.clone()))
        .map(|a| ContributorRef {
            username: a.contributor.clone(),
            avatar_url: a.contributor_avatar_url.clone(),
        })
        .collect();

    let overflow = contributors
        .len()
        .saturating_sub(ACTIVE_CONTRIBUTOR_DISPLAY_CAP);

    ActiveContributors {
        contributors,
        overflow,
    }
}

/// One slice of the activity-type distribution chart
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub activity: &'static str,
    pub count: u64,
    pub percentage: f64,
}

/// Share of PRs opened, PRs merged and issues opened in `total`
pub fn activity_distribution(groups: &[ActivityGroup], total: u64) -> Vec<DistributionSlice> {
    [
        ("PR Opened", activities::PR_OPENED),
        ("PR Merged", activities::PR_MERGED),
        ("Issues", activities::ISSUE_OPENED),
    ]
    .into_iter()
    .map(|(label, activity)| {
        let count = groups
            .iter()
            .filter(|g| g.activity_name == activity)
            .map(|g| g.activities.len() as u64)
            .sum();
        DistributionSlice {
            label,
            activity,
            count,
            percentage: percentage(count, total),
        }
    })
    .collect()
}

/// Recent activity grouped for each nested window
#[derive(Debug, Clone, Default)]
pub struct RecentWindows {
    pub week: Vec<ActivityGroup>,
    pub two_weeks: Vec<ActivityGroup>,
    pub three_weeks: Vec<ActivityGroup>,
    pub month: Vec<ActivityGroup>,
    pub two_months: Vec<ActivityGroup>,
}

/// Everything the home page shows
#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub weekly: WeeklyTotals,
    pub month_total: u64,
    pub prev_month_total: u64,
    /// Percent change of this month over the month before
    pub change: f64,
    pub active: ActiveContributors,
    pub distribution: Vec<DistributionSlice>,
    /// This week's groups, for the feed sections
    pub recent: Vec<ActivityGroup>,
}

impl HomeSummary {
    pub fn from_windows(windows: RecentWindows) -> Self {
        let week = total_activity_count(&windows.week);
        let two_weeks = total_activity_count(&windows.two_weeks);
        let three_weeks = total_activity_count(&windows.three_weeks);
        let month_total = total_activity_count(&windows.month);
        let prev_month_total =
            total_activity_count(&windows.two_months).saturating_sub(month_total);

        Self {
            weekly: WeeklyTotals::from_windows(week, two_weeks, three_weeks, month_total),
            month_total,
            prev_month_total,
            change: wow_change(month_total, prev_month_total),
            active: active_contributors(&windows.month),
            distribution: activity_distribution(&windows.month, month_total),
            recent: windows.week,
        }
    }
}

/// One page of a feed section
#[derive(Debug, Clone, Copy)]
pub struct FeedPage<'a> {
    pub items: &'a [ActivityItem],
    pub page: usize,
    pub total_pages: usize,
}

/// Page through a group; the page is clamped into range
pub fn paginate_group(group: &ActivityGroup, page: usize, per_page: usize) -> FeedPage<'_> {
    let per_page = per_page.max(1);
    let len = group.activities.len();
    let total_pages = len.div_ceil(per_page);
    let page = page.min(total_pages).max(1);
    let start = ((page - 1) * per_page).min(len);
    let end = (start + per_page).min(len);

    FeedPage {
        items: &group.activities[start..end],
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::{ActivityRecord, ContributorEntry};
    use chrono::{TimeZone, Utc};

    fn record(kind: &str, day: u32) -> ActivityRecord {
        ActivityRecord {
            kind: kind.to_string(),
            title: Some(format!("{} on {}", kind, day)),
            link: None,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            points: 2,
        }
    }

    fn snapshot() -> LeaderboardSnapshot {
        let mut alice = ContributorEntry::new("alice", Some("core"), 10);
        alice.activities = vec![record("PR merged", 1), record("Issue opened", 4)];
        let mut bob = ContributorEntry::new("bob", None, 4);
        bob.activities = vec![record("PR merged", 3)];
        let carol = ContributorEntry::new("carol", None, 0);

        LeaderboardSnapshot {
            entries: vec![alice, bob, carol],
            ..Default::default()
        }
    }

    fn groups_of(counts: &[(&str, usize)]) -> Vec<ActivityGroup> {
        counts
            .iter()
            .map(|(name, n)| ActivityGroup {
                activity_definition: name.to_string(),
                activity_name: name.to_string(),
                activity_description: None,
                activities: (0..*n)
                    .map(|i| ActivityItem {
                        slug: format!("{}-{}", name, i),
                        contributor: format!("user{}", i),
                        contributor_name: None,
                        contributor_avatar_url: None,
                        contributor_role: None,
                        occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                        closed_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                        title: None,
                        link: None,
                        points: 1,
                    })
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn test_group_recent_activities() {
        let groups = group_recent_activities(&snapshot());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].activity_name, "PR merged");
        assert_eq!(groups[1].activity_name, "Issue opened");

        // Newest first
        let merged: Vec<_> = groups[0].activities.iter().map(|a| a.contributor.as_str()).collect();
        assert_eq!(merged, vec!["bob", "alice"]);
        assert_eq!(groups[0].activities[1].contributor_role.as_deref(), Some("core"));
        assert_eq!(total_activity_count(&groups), 3);
    }

    #[test]
    fn test_empty_snapshot_has_no_groups() {
        assert!(group_recent_activities(&LeaderboardSnapshot::default()).is_empty());
    }

    #[test]
    fn test_active_contributors_distinct() {
        let groups = group_recent_activities(&snapshot());
        let active = active_contributors(&groups);
        let names: Vec<_> = active.contributors.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert_eq!(active.overflow, 0);
    }

    #[test]
    fn test_active_contributors_overflow() {
        let groups = groups_of(&[("PR merged", 42)]);
        let active = active_contributors(&groups);
        assert_eq!(active.count(), 42);
        assert_eq!(active.overflow, 12);
        assert_eq!(active.displayed().len(), 30);
    }

    #[test]
    fn test_distribution() {
        let groups = groups_of(&[("PR opened", 1), ("PR merged", 2), ("Review submitted", 3)]);
        let slices = activity_distribution(&groups, 6);
        assert_eq!(slices[0].count, 1);
        assert_eq!(slices[0].percentage, 16.7);
        assert_eq!(slices[1].percentage, 33.3);
        assert_eq!(slices[2].count, 0);
        assert_eq!(slices[2].percentage, 0.0);

        let empty = activity_distribution(&[], 0);
        assert!(empty.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_home_summary() {
        let windows = RecentWindows {
            week: groups_of(&[("PR merged", 3)]),
            two_weeks: groups_of(&[("PR merged", 5)]),
            three_weeks: groups_of(&[("PR merged", 9)]),
            month: groups_of(&[("PR merged", 10)]),
            two_months: groups_of(&[("PR merged", 18)]),
        };
        let summary = HomeSummary::from_windows(windows);
        assert_eq!(summary.weekly.weeks, [3, 2, 4, 1]);
        assert_eq!(summary.month_total, 10);
        assert_eq!(summary.prev_month_total, 8);
        assert_eq!(summary.change, 25.0);
        assert_eq!(summary.recent.len(), 1);
    }

    #[test]
    fn test_home_summary_without_history() {
        let windows = RecentWindows {
            month: groups_of(&[("PR merged", 4)]),
            two_months: groups_of(&[("PR merged", 4)]),
            ..Default::default()
        };
        let summary = HomeSummary::from_windows(windows);
        assert_eq!(summary.prev_month_total, 0);
        assert_eq!(summary.change, 0.0);
    }

    #[test]
    fn test_paginate_group() {
        let groups = groups_of(&[("PR merged", 23)]);
        let page = paginate_group(&groups[0], 3, 10);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 3);

        let page = paginate_group(&groups[0], 99, 10);
        assert_eq!(page.page, 3);

        let page = paginate_group(&groups[0], 0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.items[0].slug, "PR merged-0");
    }
}

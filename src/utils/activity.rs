// Activity type lookup tables
// Activity names are open-ended; unknown names fall back to `Other`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::entry::ActivityStats;

/// Display category for an activity name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PrMerged,
    PrOpened,
    IssueOpened,
    IssueClosed,
    IssueAssigned,
    IssueLabeled,
    ReviewSubmitted,
    Commit,
    Star,
    Other,
}

impl ActivityKind {
    /// Exact name first, then a loose substring match
    pub fn from_name(name: &str) -> Self {
        if let Some(kind) = KNOWN_ACTIVITIES.get(name) {
            return *kind;
        }

        let lower = name.to_lowercase();
        if lower.contains("merged") {
            ActivityKind::PrMerged
        } else if lower.contains("pr opened") || lower.contains("opened pr") {
            ActivityKind::PrOpened
        } else if lower.contains("issue") {
            ActivityKind::IssueOpened
        } else if lower.contains("review") {
            ActivityKind::ReviewSubmitted
        } else if lower.contains("commit") {
            ActivityKind::Commit
        } else if lower.contains("star") {
            ActivityKind::Star
        } else {
            ActivityKind::Other
        }
    }

    /// Short marker for plain-text output
    pub fn symbol(&self) -> &'static str {
        match self {
            ActivityKind::PrMerged => "[merged]",
            ActivityKind::PrOpened => "[pr]",
            ActivityKind::IssueOpened => "[issue]",
            ActivityKind::IssueClosed => "[closed]",
            ActivityKind::IssueAssigned => "[assigned]",
            ActivityKind::IssueLabeled => "[labeled]",
            ActivityKind::ReviewSubmitted => "[review]",
            ActivityKind::Commit => "[commit]",
            ActivityKind::Star => "[star]",
            ActivityKind::Other => "[*]",
        }
    }
}

static KNOWN_ACTIVITIES: Lazy<HashMap<&'static str, ActivityKind>> = Lazy::new(|| {
    HashMap::from([
        ("PR merged", ActivityKind::PrMerged),
        ("PR opened", ActivityKind::PrOpened),
        ("Issue opened", ActivityKind::IssueOpened),
        ("Issue closed", ActivityKind::IssueClosed),
        ("Issue assigned", ActivityKind::IssueAssigned),
        ("Issue labeled", ActivityKind::IssueLabeled),
        ("Review submitted", ActivityKind::ReviewSubmitted),
        ("commit", ActivityKind::Commit),
        ("star", ActivityKind::Star),
    ])
});

/// Display priority on leaderboard cards; unknown names go last
pub fn priority(activity: &str) -> u8 {
    match activity {
        "PR merged" => 1,
        "PR opened" => 2,
        "Issue closed" => 3,
        "Issue assigned" => 4,
        "Issue opened" => 5,
        "Issue labeled" => 6,
        "Review submitted" => 7,
        _ => 99,
    }
}

/// Breakdown rows ordered by priority, then name
pub fn sort_breakdown_by_priority(
    breakdown: &HashMap<String, ActivityStats>,
) -> Vec<(&str, ActivityStats)> {
    let mut rows: Vec<_> = breakdown.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| priority(a.0).cmp(&priority(b.0)).then_with(|| a.0.cmp(b.0)));
    rows
}

/// Breakdown rows ordered by points, highest first
pub fn sort_breakdown_by_points(
    breakdown: &HashMap<String, ActivityStats>,
) -> Vec<(&str, ActivityStats)> {
    let mut rows: Vec<_> = breakdown.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| b.1.points.cmp(&a.1.points).then_with(|| a.0.cmp(b.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(rows: &[(&str, u64)]) -> HashMap<String, ActivityStats> {
        rows.iter()
            .map(|(name, points)| {
                (
                    name.to_string(),
                    ActivityStats {
                        count: 1,
                        points: *points,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(ActivityKind::from_name("PR merged"), ActivityKind::PrMerged);
        assert_eq!(ActivityKind::from_name("Issue labeled"), ActivityKind::IssueLabeled);
        assert_eq!(ActivityKind::from_name("Auto-merged PR"), ActivityKind::PrMerged);
        assert_eq!(ActivityKind::from_name("issue comment"), ActivityKind::IssueOpened);
        assert_eq!(ActivityKind::from_name("Discussion answered"), ActivityKind::Other);
    }

    #[test]
    fn test_priority_order() {
        let rows = breakdown(&[
            ("Review submitted", 1),
            ("Zebra", 1),
            ("PR merged", 1),
            ("Alpha", 1),
            ("Issue opened", 1),
        ]);
        let names: Vec<_> = sort_breakdown_by_priority(&rows)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(
            names,
            vec!["PR merged", "Issue opened", "Review submitted", "Alpha", "Zebra"]
        );
    }

    #[test]
    fn test_points_order() {
        let rows = breakdown(&[("b", 5), ("a", 5), ("c", 9)]);
        let names: Vec<_> = sort_breakdown_by_points(&rows)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}

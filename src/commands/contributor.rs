// Contributor command - profile statistics for one person

use anyhow::{anyhow, Result};

use contrib_board::features::contributor::{find_contributor, ContributorStats};
use contrib_board::utils::activity::ActivityKind;
use contrib_board::utils::config::today;
use contrib_board::utils::formatters::{format_number, format_points_short, truncate};
use contrib_board::{Period, SnapshotStore};

/// Width of the points bar next to each activity type
const BAR_WIDTH: u64 = 20;

pub async fn run(store: &SnapshotStore, username: &str, period: Period) -> Result<()> {
    let snapshot = store.load(period).await?;
    let entry = find_contributor(&snapshot.entries, username)
        .ok_or_else(|| anyhow!("No contributor named {} in the {} snapshot", username, period))?;

    let stats = ContributorStats::compute(entry, today());
    print!("{}", render(&stats, entry.role()));
    Ok(())
}

pub fn render(stats: &ContributorStats<'_>, role: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} (@{})", stats.display_name, stats.username));
    if let Some(role) = role {
        out.push_str(&format!(" [{}]", role));
    }
    out.push('\n');

    out.push_str(&format!(
        "Total points: {}  |  Active days: {}  |  Avg/day: {}\n",
        format_number(stats.total_points),
        stats.active_days,
        stats.average_points_per_day
    ));
    out.push_str(&format!(
        "Current streak: {} day{}  |  Longest: {}\n",
        stats.streak.current,
        if stats.streak.current == 1 { "" } else { "s" },
        stats.streak.longest
    ));
    out.push_str(&format!(
        "This month: {} pts over {} days\n",
        format_points_short(stats.month_points),
        stats.month_active_days
    ));

    if !stats.breakdown.is_empty() {
        out.push_str("\nActivity breakdown\n");
        for (name, activity) in &stats.breakdown {
            let filled = if stats.max_points > 0 {
                (activity.points * BAR_WIDTH / stats.max_points) as usize
            } else {
                0
            };
            out.push_str(&format!(
                "  {:<10} {:<20} {:>4}x {:>6} pts {}\n",
                ActivityKind::from_name(name).symbol(),
                truncate(name, 20),
                activity.count,
                format_number(activity.points),
                "#".repeat(filled)
            ));
        }
    }

    if !stats.recent.is_empty() {
        out.push_str("\nRecent contributions\n");
        for record in &stats.recent {
            out.push_str(&format!(
                "  {} {} {}\n",
                record.occurred_at.format("%Y-%m-%d"),
                record.kind,
                truncate(record.title.as_deref().unwrap_or(""), 60)
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contrib_board::{ActivityStats, ContributorEntry};

    #[test]
    fn test_render_profile() {
        let mut entry = ContributorEntry::new("erin", Some("mentor"), 1200);
        entry.activity_breakdown.insert(
            "Review submitted".to_string(),
            ActivityStats { count: 4, points: 40 },
        );
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let stats = ContributorStats::compute(&entry, today);

        let out = render(&stats, entry.role());
        assert!(out.starts_with("erin (@erin) [mentor]\n"));
        assert!(out.contains("Total points: 1,200"));
        assert!(out.contains("Current streak: 0 days"));
        assert!(out.contains(&"#".repeat(20)));
    }
}

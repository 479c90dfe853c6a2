// Leaderboard command - ranked contributors for a period

use anyhow::{bail, Result};
use tracing::info;

use contrib_board::features::leaderboard::{
    available_roles, build_snapshot_view, filter_top_by_activity, page_numbers, PageLink,
};
use contrib_board::utils::activity::{sort_breakdown_by_priority, ActivityKind};
use contrib_board::utils::formatters::{format_number, ordinal, truncate};
use contrib_board::{LeaderboardSnapshot, Period, QueryDescriptor, SnapshotStore};

/// Entries shown per activity in the sidebar
const SIDEBAR_LIMIT: usize = 3;

pub async fn run(store: &SnapshotStore, period: Period, query: &str, search: &str) -> Result<()> {
    if !period.is_leaderboard() {
        bail!("No leaderboard for {}; use week, month or year", period);
    }

    let snapshot = store.load(period).await?;
    let mut query = QueryDescriptor::from_query_string(query)?;
    query.search_text = search.to_string();

    info!(
        "Rendering {} leaderboard ({} entries)",
        period,
        snapshot.entries.len()
    );
    print!("{}", render(&snapshot, period, &query));
    Ok(())
}

pub fn render(snapshot: &LeaderboardSnapshot, period: Period, query: &QueryDescriptor) -> String {
    let view = build_snapshot_view(snapshot, query);
    let mut out = String::new();

    out.push_str(&format!(
        "{} Leaderboard (by {})\n",
        period.label(),
        query.sort_by.label()
    ));
    if let (Some(start), Some(end)) = (&snapshot.start_date, &snapshot.end_date) {
        out.push_str(&format!("{} to {}\n", start, end));
    }

    // Role filter
    let roles: Vec<String> = available_roles(&snapshot.entries)
        .into_iter()
        .map(|role| {
            let mark = if view.active_roles.contains(&role) { "x" } else { " " };
            format!("[{}] {}", mark, role)
        })
        .collect();
    if !roles.is_empty() {
        out.push_str(&format!("Roles: {}\n", roles.join("  ")));
    }

    out.push_str(&format!(
        "Showing {} of {} contributors{}\n\n",
        view.total_visible,
        view.total_entries,
        if view.filters_active { " (filtered)" } else { "" }
    ));

    if view.page.is_empty() {
        out.push_str("No contributors match these filters.\n");
    }

    for (rank, entry) in view.ranked_page() {
        let role = entry.role().map(|r| format!(" [{}]", r)).unwrap_or_default();
        out.push_str(&format!(
            "{:>5}. {} (@{}){}: {} pts\n",
            ordinal(rank),
            truncate(entry.name(), 32),
            entry.username,
            role,
            format_number(entry.total_points)
        ));

        let activities: Vec<String> = sort_breakdown_by_priority(&entry.activity_breakdown)
            .into_iter()
            .filter(|(_, stats)| stats.count > 0)
            .map(|(name, stats)| {
                format!("{} {} {}", ActivityKind::from_name(name).symbol(), stats.count, name)
            })
            .collect();
        if !activities.is_empty() {
            out.push_str(&format!("       {}\n", activities.join(", ")));
        }
    }

    if view.total_pages > 1 {
        let links: Vec<String> = page_numbers(view.current_page, view.total_pages)
            .into_iter()
            .map(|link| match link {
                PageLink::Page(n) if n == view.current_page => format!("[{}]", n),
                PageLink::Page(n) => n.to_string(),
                PageLink::Ellipsis => "...".to_string(),
            })
            .collect();
        out.push_str(&format!(
            "\nPage {} of {}: {}\n",
            view.current_page,
            view.total_pages,
            links.join(" ")
        ));
    }

    let top = filter_top_by_activity(&snapshot.top_by_activity, &snapshot.entries, &view.active_roles);
    if !top.is_empty() {
        out.push_str("\nTop by activity\n");
        for (activity, contributors) in &top {
            out.push_str(&format!("  {} {}\n", ActivityKind::from_name(activity).symbol(), activity));
            for c in contributors.iter().take(SIDEBAR_LIMIT) {
                out.push_str(&format!(
                    "    {} - {} ({} pts)\n",
                    c.name.as_deref().unwrap_or(&c.username),
                    c.count,
                    format_number(c.points)
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrib_board::ContributorEntry;

    fn snapshot() -> LeaderboardSnapshot {
        LeaderboardSnapshot {
            entries: vec![
                ContributorEntry::new("a", Some("dev"), 10),
                ContributorEntry::new("b", Some("dev"), 10),
                ContributorEntry::new("c", Some("mentor"), 5),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_ranks() {
        let out = render(&snapshot(), Period::Week, &QueryDescriptor::default());
        assert!(out.contains("1st. a (@a) [dev]: 10 pts"));
        assert!(out.contains("3rd. c (@c) [mentor]: 5 pts"));
        assert!(out.contains("Showing 3 of 3 contributors\n"));
    }

    #[test]
    fn test_render_search_keeps_rank() {
        let mut query = QueryDescriptor::default();
        query.search_text = "c".to_string();
        let out = render(&snapshot(), Period::Week, &query);
        assert!(out.contains("3rd. c (@c)"));
        assert!(out.contains("(filtered)"));
    }

    #[test]
    fn test_render_pagination() {
        let query = QueryDescriptor::from_query_string("limit=10&page=1").unwrap();
        let out = render(&snapshot(), Period::Month, &query);
        assert!(!out.contains("Page 1 of"));
    }
}

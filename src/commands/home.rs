// Home command - monthly summary and this week's activity feed

use anyhow::Result;
use chrono::{DateTime, Utc};

use contrib_board::features::activity_feed::{paginate_group, HomeSummary};
use contrib_board::utils::activity::ActivityKind;
use contrib_board::utils::config::FEED_ITEMS_PER_PAGE;
use contrib_board::utils::formatters::{format_change, format_number, truncate};
use contrib_board::SnapshotStore;

const WEEK_LABELS: [&str; 4] = ["1st", "2nd", "3rd", "4th"];

pub async fn run(store: &SnapshotStore) -> Result<()> {
    let windows = store.load_recent_windows().await?;
    let updated_at = store.updated_at().await;
    let summary = HomeSummary::from_windows(windows);

    print!("{}", render(&summary, updated_at));
    Ok(())
}

pub fn render(summary: &HomeSummary, updated_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::new();

    if let Some(updated) = updated_at {
        out.push_str(&format!("Updated {}\n\n", updated.format("%Y-%m-%d %H:%M UTC")));
    }

    out.push_str(&format!(
        "Activities this month: {} ({} vs previous month)\n",
        format_number(summary.month_total),
        format_change(summary.change)
    ));
    for (i, (label, count)) in WEEK_LABELS.iter().zip(summary.weekly.weeks).enumerate() {
        let peak = if summary.weekly.is_peak(i) && count > 0 { " *" } else { "" };
        out.push_str(&format!("  {} week: {}{}\n", label, count, peak));
    }

    out.push_str(&format!(
        "\nActive contributors: {}\n",
        summary.active.count()
    ));
    let names: Vec<&str> = summary
        .active
        .displayed()
        .iter()
        .map(|c| c.username.as_str())
        .collect();
    if !names.is_empty() {
        out.push_str(&format!("  {}", names.join(", ")));
        if summary.active.overflow > 0 {
            out.push_str(&format!(" +{} more", summary.active.overflow));
        }
        out.push('\n');
    }

    out.push_str("\nDistribution\n");
    for slice in &summary.distribution {
        out.push_str(&format!(
            "  {}: {} ({:.1}%)\n",
            slice.label, slice.count, slice.percentage
        ));
    }

    out.push_str("\nRecent Activities\n");
    if summary.recent.is_empty() {
        out.push_str("  No activity in this period\n");
    }
    for group in &summary.recent {
        let page = paginate_group(group, 1, FEED_ITEMS_PER_PAGE);
        out.push_str(&format!(
            "  {} {} ({} / week)\n",
            ActivityKind::from_name(&group.activity_name).symbol(),
            group.activity_name,
            group.activities.len()
        ));
        for item in page.items {
            out.push_str(&format!(
                "    {} {} - {}\n",
                item.occurred_at.format("%Y-%m-%d"),
                item.contributor_name.as_deref().unwrap_or(&item.contributor),
                truncate(item.title.as_deref().unwrap_or("(untitled)"), 60)
            ));
        }
        if page.total_pages > 1 {
            out.push_str(&format!("    ... {} pages\n", page.total_pages));
        }
    }

    out
}

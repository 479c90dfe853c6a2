// Leaderboard query engine
// Role/search filtering, sorting, ranking and pagination over a snapshot's entries.
// Every function is pure: inputs are borrowed, results are new collections.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, error};

use crate::error::{DashboardError, Result};
use crate::models::entry::ContributorEntry;
use crate::models::query::{PageSize, QueryDescriptor, SortBy};
use crate::models::snapshot::{LeaderboardSnapshot, TopByActivity};

/// Username -> 1-based rank
pub type RankAssignment = HashMap<String, usize>;

/// The role set a view is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveRoles {
    pub roles: BTreeSet<String>,
    /// Set when the roles came from the user rather than the defaults
    pub explicit: bool,
}

impl ActiveRoles {
    /// No explicit selection and no visible roles to choose from: nothing is filtered.
    pub fn is_unrestricted(&self) -> bool {
        !self.explicit && self.roles.is_empty()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn admits(&self, entry: &ContributorEntry) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        entry.role().is_some_and(|role| self.roles.contains(role))
    }
}

/// Explicit selection verbatim, otherwise every role present minus the hidden ones
pub fn resolve_active_roles(
    entries: &[ContributorEntry],
    hidden_roles: &[String],
    explicit_roles: Option<&BTreeSet<String>>,
) -> ActiveRoles {
    if let Some(roles) = explicit_roles {
        return ActiveRoles {
            roles: roles.clone(),
            explicit: true,
        };
    }

    let roles = entries
        .iter()
        .filter_map(|e| e.role())
        .filter(|role| !hidden_roles.iter().any(|h| h.as_str() == *role))
        .map(String::from)
        .collect();

    ActiveRoles {
        roles,
        explicit: false,
    }
}

/// Every distinct role in the snapshot, hidden ones included, sorted
pub fn available_roles(entries: &[ContributorEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.role())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_by_role<'a>(
    entries: &'a [ContributorEntry],
    active_roles: &ActiveRoles,
) -> Vec<&'a ContributorEntry> {
    entries.iter().filter(|e| active_roles.admits(e)).collect()
}

/// Case-insensitive substring match on display name or username.
/// Blank search text keeps everything.
pub fn filter_by_search<'a>(
    entries: &[&'a ContributorEntry],
    search_text: &str,
) -> Vec<&'a ContributorEntry> {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .copied()
        .filter(|e| {
            e.name().to_lowercase().contains(&needle) || e.username.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Metric descending, then total points descending, then username ascending
pub fn compare_entries(a: &ContributorEntry, b: &ContributorEntry, sort_by: SortBy) -> Ordering {
    sort_by
        .metric(b)
        .cmp(&sort_by.metric(a))
        .then_with(|| match sort_by {
            SortBy::Points => Ordering::Equal,
            _ => b.total_points.cmp(&a.total_points),
        })
        .then_with(|| a.username.cmp(&b.username))
}

/// Sort, refusing entries that have no identity key to order by
pub fn try_sort_entries<'a>(
    entries: &[&'a ContributorEntry],
    sort_by: SortBy,
) -> Result<Vec<&'a ContributorEntry>> {
    if let Some(index) = entries.iter().position(|e| e.username.trim().is_empty()) {
        return Err(DashboardError::MalformedEntry {
            index,
            reason: "blank username".to_string(),
        });
    }

    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare_entries(a, b, sort_by));
    Ok(sorted)
}

/// Sorted copy of `entries`. On failure the input order is returned unchanged.
pub fn sort_entries<'a>(entries: &[&'a ContributorEntry], sort_by: SortBy) -> Vec<&'a ContributorEntry> {
    match try_sort_entries(entries, sort_by) {
        Ok(sorted) => sorted,
        Err(e) => {
            error!("Error sorting entries by {}: {}", sort_by.as_str(), e);
            entries.to_vec()
        }
    }
}

/// Ranks over the role-filtered set. Search and pagination are deliberately not inputs.
pub fn compute_ranks(
    entries: &[ContributorEntry],
    active_roles: &ActiveRoles,
    sort_by: SortBy,
) -> RankAssignment {
    let ranked = sort_entries(&filter_by_role(entries, active_roles), sort_by);

    let mut ranks = RankAssignment::with_capacity(ranked.len());
    for (i, entry) in ranked.iter().enumerate() {
        // Duplicate usernames keep their best rank
        ranks.entry(entry.username.clone()).or_insert(i + 1);
    }
    ranks
}

/// Displayed leaderboard state for one query
#[derive(Debug, Clone)]
pub struct LeaderboardView<'a> {
    /// Entries on the current page, in display order
    pub page: Vec<&'a ContributorEntry>,
    pub total_visible: usize,
    pub total_entries: usize,
    pub ranks: RankAssignment,
    /// Requested page clamped into range
    pub current_page: usize,
    pub total_pages: usize,
    pub active_roles: ActiveRoles,
    pub filters_active: bool,
}

impl<'a> LeaderboardView<'a> {
    /// Rank for display; 1 if the entry was never ranked
    pub fn rank_of(&self, username: &str) -> usize {
        self.ranks.get(username).copied().unwrap_or(1)
    }

    pub fn ranked_page(&self) -> Vec<(usize, &'a ContributorEntry)> {
        self.page
            .iter()
            .map(|&e| (self.rank_of(&e.username), e))
            .collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

pub fn build_view<'a>(
    entries: &'a [ContributorEntry],
    hidden_roles: &[String],
    query: &QueryDescriptor,
) -> LeaderboardView<'a> {
    let active_roles = resolve_active_roles(entries, hidden_roles, query.selected_roles.as_ref());
    let ranks = compute_ranks(entries, &active_roles, query.sort_by);

    let visible = filter_by_role(entries, &active_roles);
    let visible = filter_by_search(&visible, &query.search_text);
    let visible = sort_entries(&visible, query.sort_by);

    let (page, current_page, total_pages) = match query.page_size {
        PageSize::Unbounded => (visible.clone(), 1, 1),
        PageSize::Limited(size) => {
            let size = size.get();
            let total_pages = visible.len().div_ceil(size);
            let current_page = query.page_number.min(total_pages).max(1);
            let start = ((current_page - 1) * size).min(visible.len());
            let end = (start + size).min(visible.len());
            (visible[start..end].to_vec(), current_page, total_pages)
        }
    };

    if current_page != query.page_number {
        debug!(
            "Clamped page {} to {} of {}",
            query.page_number, current_page, total_pages
        );
    }

    LeaderboardView {
        page,
        total_visible: visible.len(),
        total_entries: entries.len(),
        ranks,
        current_page,
        total_pages,
        filters_active: query.has_filters(),
        active_roles,
    }
}

pub fn build_snapshot_view<'a>(
    snapshot: &'a LeaderboardSnapshot,
    query: &QueryDescriptor,
) -> LeaderboardView<'a> {
    build_view(&snapshot.entries, &snapshot.hidden_roles, query)
}

/// Sidebar lists restricted to contributors in the active roles.
/// Activities left with nobody are dropped.
pub fn filter_top_by_activity(
    top_by_activity: &TopByActivity,
    entries: &[ContributorEntry],
    active_roles: &ActiveRoles,
) -> TopByActivity {
    if active_roles.is_unrestricted() {
        return top_by_activity.clone();
    }

    let roles: HashMap<&str, Option<&str>> = entries
        .iter()
        .map(|e| (e.username.as_str(), e.role()))
        .collect();

    top_by_activity
        .iter()
        .filter_map(|(activity, contributors)| {
            let kept: Vec<_> = contributors
                .iter()
                .filter(|c| {
                    roles
                        .get(c.username.as_str())
                        .copied()
                        .flatten()
                        .is_some_and(|role| active_roles.contains(role))
                })
                .cloned()
                .collect();
            (!kept.is_empty()).then(|| (activity.clone(), kept))
        })
        .collect()
}

/// One slot in the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page numbers to show around `current`, collapsing long ranges
pub fn page_numbers(current: usize, total: usize) -> Vec<PageLink> {
    use PageLink::{Ellipsis, Page};

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }

    let mut pages = vec![Page(1)];
    if current <= 4 {
        pages.extend((2..=5).map(Page));
        pages.push(Ellipsis);
        pages.push(Page(total));
    } else if current >= total - 3 {
        pages.push(Ellipsis);
        pages.extend((total - 4..=total).map(Page));
    } else {
        pages.push(Ellipsis);
        pages.extend([Page(current - 1), Page(current), Page(current + 1)]);
        pages.push(Ellipsis);
        pages.push(Page(total));
    }
    pages
}

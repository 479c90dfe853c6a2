// Leaderboard query descriptor
// The view state a caller hands to the query engine on every change

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use super::entry::ContributorEntry;
use crate::error::{DashboardError, Result};
use crate::utils::config::{activities, ALLOWED_PAGE_SIZES};

/// Leaderboard sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Points,
    PrOpened,
    PrMerged,
    Issues,
    Reviews,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Points,
        SortBy::PrOpened,
        SortBy::PrMerged,
        SortBy::Issues,
        SortBy::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Points => "points",
            SortBy::PrOpened => "pr_opened",
            SortBy::PrMerged => "pr_merged",
            SortBy::Issues => "issues",
            SortBy::Reviews => "reviews",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Points => "Points",
            SortBy::PrOpened => "PRs opened",
            SortBy::PrMerged => "PRs merged",
            SortBy::Issues => "Issues",
            SortBy::Reviews => "Reviews",
        }
    }

    /// Activity type whose count drives this sort, `None` for total points
    pub fn activity(&self) -> Option<&'static str> {
        match self {
            SortBy::Points => None,
            SortBy::PrOpened => Some(activities::PR_OPENED),
            SortBy::PrMerged => Some(activities::PR_MERGED),
            SortBy::Issues => Some(activities::ISSUE_OPENED),
            SortBy::Reviews => Some(activities::REVIEW_SUBMITTED),
        }
    }

    /// Primary metric for an entry under this sort
    pub fn metric(&self, entry: &ContributorEntry) -> u64 {
        match self.activity() {
            Some(activity) => entry.activity_count(activity),
            None => entry.total_points,
        }
    }

    /// Lenient parse for the `sort` parameter: unknown values mean `points`
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl std::str::FromStr for SortBy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s.trim())
            .ok_or_else(|| DashboardError::InvalidQuery(format!("unknown sort key: {}", s)))
    }
}

/// Page size, either a fixed row count or everything on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Limited(NonZeroUsize),
    #[default]
    Unbounded,
}

impl PageSize {
    /// Build a limited page size; 0 means unbounded
    pub fn limited(rows: usize) -> Self {
        NonZeroUsize::new(rows)
            .map(PageSize::Limited)
            .unwrap_or(PageSize::Unbounded)
    }

    /// Parse the `limit` parameter; only the allowed sizes are accepted
    pub fn from_limit(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| ALLOWED_PAGE_SIZES.contains(n))
            .map(PageSize::limited)
            .unwrap_or(PageSize::Unbounded)
    }

    pub fn get(&self) -> Option<usize> {
        match self {
            PageSize::Limited(n) => Some(n.get()),
            PageSize::Unbounded => None,
        }
    }
}

/// Raw query-string parameters as they appear in the page URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

/// Desired leaderboard view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Case-insensitive name/username filter. Never affects ranks.
    pub search_text: String,
    /// `None` means no explicit selection: all roles that aren't hidden.
    /// `Some(empty)` means the user cleared every role.
    pub selected_roles: Option<BTreeSet<String>>,
    pub sort_by: SortBy,
    pub page_size: PageSize,
    /// 1-based
    pub page_number: usize,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_roles: None,
            sort_by: SortBy::Points,
            page_size: PageSize::Unbounded,
            page_number: 1,
        }
    }
}

impl QueryDescriptor {
    pub fn from_params(params: &QueryParams) -> Self {
        let selected_roles = params
            .roles
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(String::from)
                    .collect::<BTreeSet<_>>()
            })
            .filter(|roles| !roles.is_empty());

        let page_number = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1);

        Self {
            search_text: String::new(),
            selected_roles,
            sort_by: SortBy::from_param(params.sort.as_deref()),
            page_size: PageSize::from_limit(params.limit.as_deref()),
            page_number,
        }
    }

    /// Parse a URL query string such as `roles=core&sort=reviews&page=2&limit=25`
    pub fn from_query_string(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: QueryParams = serde_urlencoded::from_str(query)
            .map_err(|e| DashboardError::InvalidQuery(e.to_string()))?;
        Ok(Self::from_params(&params))
    }

    /// Canonical parameters; defaults are left out
    pub fn to_params(&self) -> QueryParams {
        QueryParams {
            roles: self
                .selected_roles
                .as_ref()
                .filter(|roles| !roles.is_empty())
                .map(|roles| roles.iter().cloned().collect::<Vec<_>>().join(",")),
            sort: (self.sort_by != SortBy::Points).then(|| self.sort_by.as_str().to_string()),
            page: (self.page_number > 1).then(|| self.page_number.to_string()),
            limit: self.page_size.get().map(|n| n.to_string()),
        }
    }

    /// Search text is not part of the URL
    pub fn to_query_string(&self) -> Result<String> {
        serde_urlencoded::to_string(self.to_params())
            .map_err(|e| DashboardError::InvalidQuery(e.to_string()))
    }

    /// Whether anything narrows or reorders the default view
    pub fn has_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || self.selected_roles.is_some()
            || self.sort_by != SortBy::Points
    }

    /// New search text; returns to the first page
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            search_text: text.to_string(),
            page_number: 1,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_by: SortBy) -> Self {
        Self {
            sort_by,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self.clone()
        }
    }

    /// New page size; returns to the first page
    pub fn with_page_size(&self, page_size: PageSize) -> Self {
        Self {
            page_size,
            page_number: 1,
            ..self.clone()
        }
    }

    /// Flip one role in the currently active set and return to the first page.
    /// Deselecting the last role drops the explicit selection entirely.
    pub fn toggle_role(&self, role: &str, active_roles: &BTreeSet<String>) -> Self {
        let mut roles = active_roles.clone();
        if !roles.remove(role) {
            roles.insert(role.to_string());
        }

        Self {
            selected_roles: if roles.is_empty() { None } else { Some(roles) },
            page_number: 1,
            ..self.clone()
        }
    }

    /// Drop roles, sort, page and search; page size is kept
    pub fn clear_filters(&self) -> Self {
        Self {
            page_size: self.page_size,
            ..Self::default()
        }
    }
}

//! Contributor activity dashboard data layer.
//!
//! Turns pre-aggregated leaderboard snapshots into ranked, filtered, paginated
//! views plus the derived metrics the dashboard widgets show. The query engine
//! in [`features::leaderboard`] is synchronous and pure; only snapshot loading
//! in [`api::snapshots`] touches the filesystem.

pub mod api;
pub mod error;
pub mod features;
pub mod models;
pub mod utils;

pub use api::snapshots::SnapshotStore;
pub use error::{DashboardError, Result};
pub use features::leaderboard::{
    build_snapshot_view, build_view, compute_ranks, filter_by_role, filter_by_search,
    resolve_active_roles, sort_entries, ActiveRoles, LeaderboardView, RankAssignment,
};
pub use models::entry::{ActivityStats, ContributorEntry, DailyActivity};
pub use models::query::{PageSize, QueryDescriptor, SortBy};
pub use models::snapshot::{LeaderboardSnapshot, Period};

// Dashboard features built on top of the snapshot models
pub mod activity_feed;
pub mod contributor;
pub mod leaderboard;

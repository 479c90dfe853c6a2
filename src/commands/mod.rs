// CLI commands; each loads what it needs and prints a plain-text view
pub mod contributor;
pub mod home;
pub mod leaderboard;

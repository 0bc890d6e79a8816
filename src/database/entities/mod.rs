pub mod leaderboard_entry;

pub type LeaderboardEntry = leaderboard_entry::Model;
pub use leaderboard_entry::{IntegerField, NewLeaderboardEntry, PlayerStats, ValidationError};

use self::entities::{LeaderboardEntry, NewLeaderboardEntry, ValidationError};
use crate::config::DatabaseConfig;
use futures_util::future::BoxFuture;
use log::info;
use std::sync::Arc;
use thiserror::Error;

pub mod entities;
mod mongo;

/// In memory store for testing the routes without a database
#[cfg(test)]
pub mod memory;

pub use mongo::MongoStore;

/// Database error result type
pub type DbResult<T> = Result<T, DbError>;

/// Store shared between all the request handlers
pub type SharedStore = Arc<dyn LeaderboardStore>;

#[derive(Debug, Error)]
pub enum DbError {
    /// The connection to the database could not be created at startup
    #[error("Database connection is unavailable")]
    Unavailable,
    /// Error from the underlying database driver
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    /// The entry was missing required fields
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Storage for leaderboard entries. Every request performs at
/// most one of these operations.
pub trait LeaderboardStore: Send + Sync {
    /// Retrieves at most `limit` entries ordered by score, highest
    /// score first. Order between equal scores is unspecified.
    fn top(&self, limit: usize) -> BoxFuture<'_, DbResult<Vec<LeaderboardEntry>>>;

    /// Validates and stores a new entry returning the stored entry
    /// with its assigned identifier
    fn create(&self, entry: NewLeaderboardEntry) -> BoxFuture<'_, DbResult<LeaderboardEntry>>;

    /// Removes the entry with the provided identifier. Returns whether
    /// an entry was removed, identifiers that could never exist are
    /// treated as not found.
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, DbResult<bool>>;
}

/// Creates the store used for the lifetime of the server. Failing
/// to connect is logged but not fatal, requests will fail until
/// the database is reachable.
pub async fn init(config: &DatabaseConfig) -> SharedStore {
    info!("Connecting to database ({})", config.display_target());
    Arc::new(MongoStore::connect(config).await)
}

use super::{
    entities::{LeaderboardEntry, NewLeaderboardEntry},
    DbResult, LeaderboardStore,
};
use bson::oid::ObjectId;
use chrono::Utc;
use futures_util::future::BoxFuture;
use parking_lot::RwLock;

/// Store keeping entries in insertion order within the process
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl LeaderboardStore for MemoryStore {
    fn top(&self, limit: usize) -> BoxFuture<'_, DbResult<Vec<LeaderboardEntry>>> {
        let mut entries = self.entries.read().clone();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Box::pin(async move { Ok(entries) })
    }

    fn create(&self, entry: NewLeaderboardEntry) -> BoxFuture<'_, DbResult<LeaderboardEntry>> {
        Box::pin(async move {
            let entry = LeaderboardEntry::create(ObjectId::new().to_hex(), entry, Utc::now())?;
            self.entries.write().push(entry.clone());
            Ok(entry)
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, DbResult<bool>> {
        Box::pin(async move {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            Ok(entries.len() != before)
        })
    }
}

#[cfg(test)]
mod test {
    use super::MemoryStore;
    use crate::database::{
        entities::{leaderboard_entry::test::new_entry, IntegerField},
        DbError, LeaderboardStore,
    };

    #[tokio::test]
    async fn test_top_ordering_and_limit() {
        let store = MemoryStore::default();
        for score in [30, 10, 50, 20, 40] {
            store
                .create(new_entry(&format!("player{score}"), score))
                .await
                .unwrap();
        }

        let top = store.top(3).await.unwrap();
        let scores: Vec<i64> = top.iter().map(|entry| entry.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);

        let all = store.top(100).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::default();
        let entry = store.create(new_entry("Ana", 500)).await.unwrap();

        assert!(store.delete(&entry.id).await.unwrap());
        assert!(!store.delete(&entry.id).await.unwrap());
        assert!(!store.delete("missing").await.unwrap());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_invalid_entry_not_stored() {
        let store = MemoryStore::default();
        let mut entry = new_entry("Ana", 500);
        entry.levelachieved = IntegerField::Missing;

        let result = store.create(entry).await;
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert_eq!(store.len(), 0);
    }
}

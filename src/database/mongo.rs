use super::{
    entities::{LeaderboardEntry, NewLeaderboardEntry, PlayerStats},
    DbError, DbResult, LeaderboardStore,
};
use crate::{config::DatabaseConfig, utils::numeric::truncate_to_i64};
use bson::{doc, oid::ObjectId, Bson, DateTime};
use futures_util::{future::BoxFuture, TryStreamExt};
use log::{error, info};
use mongodb::{options::FindOptions, Client, Collection, Database};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Name of the collection entries are stored in
const COLLECTION_NAME: &str = "leaderboards";

/// Stored form of a [LeaderboardEntry]
#[derive(Debug, Serialize, Deserialize)]
struct EntryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    difficulty: String,
    statsp1: PlayerStats,
    /// Older documents may store null instead of the empty stats
    #[serde(default)]
    statsp2: Option<PlayerStats>,
    #[serde(deserialize_with = "lenient_integer")]
    score: i64,
    #[serde(deserialize_with = "lenient_integer")]
    levelachieved: i64,
    #[serde(deserialize_with = "lenient_integer")]
    totalkill: i64,
    date: DateTime,
    version: String,
}

impl EntryDocument {
    fn from_entry(id: ObjectId, entry: &LeaderboardEntry) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            difficulty: entry.difficulty.clone(),
            statsp1: entry.statsp1.clone(),
            statsp2: Some(entry.statsp2.clone()),
            score: entry.score,
            levelachieved: entry.levelachieved,
            totalkill: entry.totalkill,
            date: DateTime::from_chrono(entry.date),
            version: entry.version.clone(),
        }
    }

    fn into_entry(self) -> LeaderboardEntry {
        LeaderboardEntry {
            id: self.id.to_hex(),
            name: self.name,
            difficulty: self.difficulty,
            statsp1: self.statsp1,
            statsp2: self.statsp2.unwrap_or_default(),
            score: self.score,
            levelachieved: self.levelachieved,
            totalkill: self.totalkill,
            date: self.date.to_chrono(),
            version: self.version,
        }
    }
}

/// Reads an integer that may have been stored as any BSON number,
/// documents written by other clients can hold doubles
fn lenient_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::Int32(value) => Ok(value as i64),
        Bson::Int64(value) => Ok(value),
        Bson::Double(value) => truncate_to_i64(value)
            .ok_or_else(|| D::Error::custom(format!("double {value} is not a valid integer"))),
        other => Err(D::Error::custom(format!(
            "expected an integer, found {:?}",
            other.element_type()
        ))),
    }
}

/// Store backed by a MongoDB collection
pub struct MongoStore {
    /// Collection handle, missing when the client could not be
    /// created at startup
    collection: Option<Collection<EntryDocument>>,
}

impl MongoStore {
    /// Creates the client for the configured database. The connection
    /// itself is checked in the background so startup is never
    /// blocked or stopped by an unreachable database.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let client = match Client::with_uri_str(config.connection_uri()).await {
            Ok(value) => value,
            Err(err) => {
                error!("Error connecting to MongoDB: {}", err);
                return Self::disconnected();
            }
        };

        let database: Database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        let ping = database.clone();
        tokio::spawn(async move {
            match ping.run_command(doc! { "ping": 1 }, None).await {
                Ok(_) => info!("Connected to MongoDB"),
                Err(err) => error!("Error connecting to MongoDB: {}", err),
            }
        });

        Self {
            collection: Some(database.collection(COLLECTION_NAME)),
        }
    }

    /// Store without a client, every operation fails with
    /// [DbError::Unavailable]
    pub fn disconnected() -> Self {
        Self { collection: None }
    }

    fn collection(&self) -> DbResult<&Collection<EntryDocument>> {
        self.collection.as_ref().ok_or(DbError::Unavailable)
    }
}

impl LeaderboardStore for MongoStore {
    fn top(&self, limit: usize) -> BoxFuture<'_, DbResult<Vec<LeaderboardEntry>>> {
        Box::pin(async move {
            let collection = self.collection()?;
            let options = FindOptions::builder()
                .sort(doc! { "score": -1 })
                .limit(limit as i64)
                .build();

            let documents: Vec<EntryDocument> =
                collection.find(None, options).await?.try_collect().await?;

            Ok(documents
                .into_iter()
                .map(EntryDocument::into_entry)
                .collect())
        })
    }

    fn create(&self, entry: NewLeaderboardEntry) -> BoxFuture<'_, DbResult<LeaderboardEntry>> {
        Box::pin(async move {
            let collection = self.collection()?;

            let id = ObjectId::new();
            // Stored dates only keep millisecond precision
            let date = DateTime::now().to_chrono();
            let entry = LeaderboardEntry::create(id.to_hex(), entry, date)?;

            collection
                .insert_one(EntryDocument::from_entry(id, &entry), None)
                .await?;

            Ok(entry)
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, DbResult<bool>> {
        Box::pin(async move {
            let collection = self.collection()?;

            let id = match ObjectId::parse_str(id) {
                Ok(value) => value,
                Err(_) => return Ok(false),
            };

            let result = collection.delete_one(doc! { "_id": id }, None).await?;
            Ok(result.deleted_count > 0)
        })
    }
}

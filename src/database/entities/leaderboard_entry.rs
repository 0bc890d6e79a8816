use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version tag stored on entries that didn't provide their own
pub const DEFAULT_VERSION: &str = "1.0";

/// Opaque database assigned identifier (ObjectId hex string)
pub type EntryId = String;

/// A single recorded game session result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Unique identifier assigned by the database
    #[serde(rename = "_id")]
    pub id: EntryId,
    pub name: String,
    pub difficulty: String,
    /// Stats for the first player, every field is always set
    pub statsp1: PlayerStats,
    /// Stats for the second player, fields are null for single
    /// player sessions
    pub statsp2: PlayerStats,
    pub score: i64,
    pub levelachieved: i64,
    pub totalkill: i64,
    /// When the entry was submitted
    pub date: DateTime<Utc>,
    pub version: String,
}

/// Character build details for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub character: Option<String>,
    pub upgrade: Option<String>,
    pub charstats: Option<String>,
}

impl PlayerStats {
    /// Stats with every field set to null
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Entry details that have not been stored yet, the identifier
/// and date are assigned when it is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardEntry {
    pub name: String,
    pub difficulty: String,
    pub statsp1: PlayerStats,
    pub statsp2: Option<PlayerStats>,
    pub score: i64,
    pub levelachieved: IntegerField,
    pub totalkill: IntegerField,
    pub version: Option<String>,
}

/// Integer field as it was received from the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerField {
    /// The field was not provided or was null
    Missing,
    /// The field was provided but no integer could be taken from it
    Invalid,
    Value(i64),
}

impl IntegerField {
    fn check(self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            Self::Missing => Err(ValidationError::Required(field)),
            Self::Invalid => Err(ValidationError::NotInteger(field)),
            Self::Value(value) => Ok(value),
        }
    }
}

/// Field that failed validation before an entry could be stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Path `{0}` is required.")]
    Required(&'static str),
    #[error("Path `{0}` must be an integer.")]
    NotInteger(&'static str),
}

impl NewLeaderboardEntry {
    /// Checks the required fields of the entry, stores run this
    /// regardless of any checks done on the request
    pub fn validate(&self) -> Result<(), ValidationError> {
        fn required(value: Option<&str>, field: &'static str) -> Result<(), ValidationError> {
            match value {
                Some(value) if !value.is_empty() => Ok(()),
                _ => Err(ValidationError::Required(field)),
            }
        }

        required(Some(self.name.as_str()), "name")?;
        required(Some(self.difficulty.as_str()), "difficulty")?;
        required(self.statsp1.character.as_deref(), "statsp1.character")?;
        required(self.statsp1.upgrade.as_deref(), "statsp1.upgrade")?;
        required(self.statsp1.charstats.as_deref(), "statsp1.charstats")?;

        self.levelachieved.check("levelachieved")?;
        self.totalkill.check("totalkill")?;

        Ok(())
    }
}

impl Model {
    /// Validates the new entry and applies the defaults for any
    /// missing optional fields
    pub fn create(
        id: EntryId,
        new: NewLeaderboardEntry,
        date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        new.validate()?;
        let levelachieved = new.levelachieved.check("levelachieved")?;
        let totalkill = new.totalkill.check("totalkill")?;

        let NewLeaderboardEntry {
            name,
            difficulty,
            statsp1,
            statsp2,
            score,
            version,
            ..
        } = new;

        Ok(Self {
            id,
            name,
            difficulty,
            statsp1,
            statsp2: statsp2.unwrap_or_else(PlayerStats::empty),
            score,
            levelachieved,
            totalkill,
            date,
            version: version
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::{
        IntegerField, Model, NewLeaderboardEntry, PlayerStats, ValidationError, DEFAULT_VERSION,
    };
    use chrono::Utc;

    pub(crate) fn stats(character: &str, upgrade: &str, charstats: &str) -> PlayerStats {
        PlayerStats {
            character: Some(character.to_string()),
            upgrade: Some(upgrade.to_string()),
            charstats: Some(charstats.to_string()),
        }
    }

    /// Valid single player entry used across the tests
    pub(crate) fn new_entry(name: &str, score: i64) -> NewLeaderboardEntry {
        NewLeaderboardEntry {
            name: name.to_string(),
            difficulty: "hard".to_string(),
            statsp1: stats("mage", "fireball", "str10"),
            statsp2: None,
            score,
            levelachieved: IntegerField::Value(3),
            totalkill: IntegerField::Value(12),
            version: None,
        }
    }

    #[test]
    fn test_create_defaults() {
        let date = Utc::now();
        let entry = Model::create("abc".to_string(), new_entry("Ana", 500), date).unwrap();

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.score, 500);
        assert_eq!(entry.statsp2, PlayerStats::empty());
        assert_eq!(entry.version, DEFAULT_VERSION);
        assert_eq!(entry.date, date);
    }

    #[test]
    fn test_create_keeps_optional_fields() {
        let mut new = new_entry("Ana", 500);
        new.statsp2 = Some(stats("rogue", "dash", "dex8"));
        new.version = Some("2.1".to_string());

        let entry = Model::create("abc".to_string(), new, Utc::now()).unwrap();
        assert_eq!(entry.statsp2.character.as_deref(), Some("rogue"));
        assert_eq!(entry.version, "2.1");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut new = new_entry("", 500);
        assert_eq!(new.validate(), Err(ValidationError::Required("name")));

        new = new_entry("Ana", 500);
        new.difficulty.clear();
        assert_eq!(new.validate(), Err(ValidationError::Required("difficulty")));

        new = new_entry("Ana", 500);
        new.statsp1.upgrade = None;
        assert_eq!(
            new.validate(),
            Err(ValidationError::Required("statsp1.upgrade"))
        );

        new = new_entry("Ana", 500);
        new.totalkill = IntegerField::Missing;
        assert_eq!(new.validate(), Err(ValidationError::Required("totalkill")));

        new = new_entry("Ana", 500);
        new.levelachieved = IntegerField::Invalid;
        assert_eq!(
            new.validate(),
            Err(ValidationError::NotInteger("levelachieved"))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let entry = Model::create("abc".to_string(), new_entry("Ana", 500), Utc::now()).unwrap();
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["_id"], "abc");
        assert_eq!(value["statsp1"]["charstats"], "str10");
        assert!(value["statsp2"]["character"].is_null());
        assert!(value["statsp2"]["upgrade"].is_null());
        assert!(value["statsp2"]["charstats"].is_null());
        assert!(value.get("id").is_none());
    }
}

use crate::{
    database::{
        entities::{
            IntegerField, LeaderboardEntry, NewLeaderboardEntry, PlayerStats, ValidationError,
        },
        DbError, SharedStore,
    },
    utils::numeric::LooseNumber,
};
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Extension, Json, Router,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The maximum number of entries included in the leaderboard
const LEADERBOARD_LIMIT: usize = 100;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /api
pub fn router() -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard).post(submit_entry))
        .route("/leaderboard/:id", delete(delete_entry))
}

/// Error type used in leaderboard routes. Database failures are
/// logged and only a generic message is sent to the client.
#[derive(Debug, Error)]
enum LeaderboardError {
    /// The request body was not a valid submission object
    #[error("Invalid leaderboard score payload.")]
    InvalidBody,
    /// One of the fields checked by the route was missing or invalid
    #[error("Name, valid score, and player class are required.")]
    InvalidSubmission,
    /// The store rejected the entry
    #[error("{0}")]
    InvalidEntry(ValidationError),
    /// No entry matched the requested identifier
    #[error("Leaderboard score not found.")]
    NotFound,
    #[error("Error fetching leaderboard.")]
    FetchFailed,
    #[error("Error adding leaderboard score.")]
    CreateFailed,
    #[error("Error deleting leaderboard score.")]
    DeleteFailed,
}

type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Body of a score submission. Every field is optional here so
/// that missing fields produce the validation message rather than
/// a deserialization error.
#[derive(Deserialize)]
struct SubmitRequest {
    name: Option<String>,
    difficulty: Option<String>,
    statsp1: Option<PlayerStats>,
    statsp2: Option<PlayerStats>,
    score: Option<LooseNumber>,
    levelachieved: Option<LooseNumber>,
    totalkill: Option<LooseNumber>,
    version: Option<String>,
}

impl SubmitRequest {
    /// Checks the fields required by the route and coerces the numeric
    /// fields into the entry that will be stored
    fn into_entry(self) -> LeaderboardResult<NewLeaderboardEntry> {
        let (Some(name), Some(difficulty), Some(statsp1), Some(score)) =
            (self.name, self.difficulty, self.statsp1, self.score)
        else {
            return Err(LeaderboardError::InvalidSubmission);
        };

        if name.is_empty() || difficulty.is_empty() || !score.is_numeric() {
            return Err(LeaderboardError::InvalidSubmission);
        }

        let score = score
            .to_integer()
            .ok_or(LeaderboardError::InvalidSubmission)?;

        Ok(NewLeaderboardEntry {
            name,
            difficulty,
            statsp1,
            statsp2: self.statsp2,
            score,
            levelachieved: integer_field(self.levelachieved),
            totalkill: integer_field(self.totalkill),
            version: self.version,
        })
    }
}

/// Coerces an optional numeric field leaving the decision of whether
/// it is required to the store
fn integer_field(value: Option<LooseNumber>) -> IntegerField {
    match value {
        None => IntegerField::Missing,
        Some(value) => value
            .to_integer()
            .map_or(IntegerField::Invalid, IntegerField::Value),
    }
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// GET /api/leaderboard
///
/// Retrieves the top entries of the leaderboard with the highest
/// score first
async fn get_leaderboard(
    Extension(store): Extension<SharedStore>,
) -> LeaderboardResult<Json<Vec<LeaderboardEntry>>> {
    let entries = store.top(LEADERBOARD_LIMIT).await.map_err(|err| {
        error!("Error fetching leaderboard: {}", err);
        LeaderboardError::FetchFailed
    })?;

    debug!("Leaderboard data retrieved successfully");
    Ok(Json(entries))
}

/// POST /api/leaderboard
///
/// Stores a new leaderboard entry responding with the created entry
/// including its assigned identifier
async fn submit_entry(
    Extension(store): Extension<SharedStore>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> LeaderboardResult<(StatusCode, Json<LeaderboardEntry>)> {
    let Json(request) = payload.map_err(|err| {
        debug!("Rejected leaderboard submission body: {}", err);
        LeaderboardError::InvalidBody
    })?;

    let entry = request.into_entry()?;

    let entry = store.create(entry).await.map_err(|err| match err {
        DbError::Validation(err) => LeaderboardError::InvalidEntry(err),
        err => {
            error!("Error adding leaderboard score: {}", err);
            LeaderboardError::CreateFailed
        }
    })?;

    info!(
        "Data successfully added to the leaderboard: {}, {}, {}",
        entry.name, entry.difficulty, entry.score
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/leaderboard/:id
///
/// Removes the entry with the provided identifier
///
/// `id` The identifier of the entry to remove
async fn delete_entry(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> LeaderboardResult<Json<MessageResponse>> {
    let deleted = store.delete(&id).await.map_err(|err| {
        error!("Error deleting leaderboard score: {}", err);
        LeaderboardError::DeleteFailed
    })?;

    if !deleted {
        return Err(LeaderboardError::NotFound);
    }

    info!("Deleted leaderboard score (ID: {})", id);

    Ok(Json(MessageResponse {
        message: "Leaderboard score deleted successfully.",
    }))
}

/// IntoResponse implementation for LeaderboardError to allow it to be
/// used within the result type as a error response
impl IntoResponse for LeaderboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidBody | Self::InvalidSubmission | Self::InvalidEntry(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::FetchFailed | Self::CreateFailed | Self::DeleteFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

//! HTTP server exposing the game over a small query-parameterized API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, instrument};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::db::GameRepository;
use crate::doc::ApiDoc;
use crate::service::{GameError, GameService, SessionReport};

/// Shared state for game handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    service: Arc<GameService<GameRepository>>,
}

/// Query parameters for starting a game.
#[derive(Debug, Deserialize)]
pub struct StartParams {
    /// Player name; the user is created on first contact.
    pub user: String,
}

/// Query parameters for guessing a letter.
#[derive(Debug, Deserialize)]
pub struct GuessParams {
    /// Session id returned by `/start`.
    pub id: i32,
    /// The guessed letter.
    pub letter: char,
}

/// Query parameters for the statistics report.
#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    /// Restrict to sessions with this status (case-insensitive).
    pub status: Option<String>,
    /// Restrict to sessions owned by this user.
    pub user: Option<String>,
}

/// Query parameters for deleting a user.
#[derive(Debug, Deserialize)]
pub struct UserParams {
    /// Exact name of the user to delete.
    pub user: String,
}

/// Wrapper turning [`GameError`] into an HTTP 500 response.
#[derive(Debug, derive_more::From)]
pub struct ApiError(GameError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

/// Starts a new game session for a user.
#[utoipa::path(
    post,
    path = "/start",
    tags = ["game"],
    params(
        ("user" = String, Query, description = "Player name; the user is created on first contact")
    ),
    responses(
        (status = 200, description = "Session created; the id appears in the message"),
        (status = 500, description = "Word list unusable or storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn start(
    State(state): State<AppState>,
    Query(params): Query<StartParams>,
) -> Result<String, ApiError> {
    info!(user = %params.user, "Start requested");
    let session_id = state.service.start_game(&params.user)?;
    Ok(format!("New game started. Session ID: {session_id}"))
}

/// Applies a letter guess to a session.
#[utoipa::path(
    post,
    path = "/guess",
    tags = ["game"],
    params(
        ("id" = i32, Query, description = "Session id returned by /start"),
        ("letter" = String, Query, description = "Single letter to guess")
    ),
    responses(
        (status = 200, description = "Guess outcome message"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn guess(
    State(state): State<AppState>,
    Query(params): Query<GuessParams>,
) -> Result<String, ApiError> {
    info!(session_id = params.id, letter = %params.letter, "Guess requested");
    let outcome = state.service.guess_letter(params.id, params.letter)?;
    Ok(outcome.to_string())
}

/// Reports sessions joined with their owners.
#[utoipa::path(
    get,
    path = "/statistics",
    tags = ["game"],
    params(
        ("status" = Option<String>, Query, description = "Filter by status name, case-insensitive"),
        ("user" = Option<String>, Query, description = "Filter by exact user name")
    ),
    responses(
        (status = 200, description = "Sessions ordered by id", body = [SessionReport]),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn statistics(
    State(state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Result<Json<Vec<SessionReport>>, ApiError> {
    info!(status = ?params.status, user = ?params.user, "Statistics requested");
    let report = state
        .service
        .statistics(params.status.as_deref(), params.user.as_deref())?;
    Ok(Json(report))
}

/// Deletes a user and all of their sessions.
#[utoipa::path(
    delete,
    path = "/user",
    tags = ["game"],
    params(
        ("user" = String, Query, description = "Exact name of the user to delete")
    ),
    responses(
        (status = 200, description = "Deletion outcome message"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<String, ApiError> {
    info!(user = %params.user, "User deletion requested");
    let outcome = state.service.delete_user(&params.user)?;
    Ok(outcome.to_string())
}

/// Builds the application router with all game routes and Swagger UI.
pub fn game_router(service: GameService<GameRepository>) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/start", post(start))
        .route("/guess", post(guess))
        .route("/statistics", get(statistics))
        .route("/user", delete(delete_user))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

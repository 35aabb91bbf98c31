//! REST API over a shared [`Arena`].

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{
        Path, Request, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::arena::{Arena, PlayResult};
use crate::db::Player;
use crate::error::{ArenaError, ArenaErrorKind};
use crate::games::jokenpo::{Move, Outcome};
use crate::ledger::Match;
use crate::stats::ScoreboardRow;

/// Arena shared between request handlers. One lock guards both the
/// registry and the ledger.
pub type SharedArena = Arc<Mutex<Arena>>;

/// Request body for `POST /players`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    /// Display name; surrounding whitespace is trimmed.
    pub name: String,
}

/// Request body for `POST /jokenpo/play`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Registered player id.
    pub player_id: i32,
    /// The player's move.
    #[serde(rename = "move")]
    pub player_move: Move,
}

/// One entry of `GET /jokenpo/history/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Player id.
    pub player_id: i32,
    /// Player's name when the match was played.
    pub player_name: String,
    /// Player's move.
    pub player_move: Move,
    /// CPU's move.
    pub cpu_move: Move,
    /// Outcome for the player.
    pub result: Outcome,
    /// When the match was played (UTC).
    pub played_at: NaiveDateTime,
}

impl From<&Match> for MatchRecord {
    fn from(m: &Match) -> Self {
        Self {
            player_id: *m.player_id(),
            player_name: m.player_name().clone(),
            player_move: *m.player_move(),
            cpu_move: *m.opponent_move(),
            result: m.outcome(),
            played_at: *m.played_at(),
        }
    }
}

/// Error response with a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ArenaError> for ApiError {
    fn from(err: ArenaError) -> Self {
        match err.kind() {
            ArenaErrorKind::Validation { message } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            ArenaErrorKind::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Player not found")
            }
            ArenaErrorKind::Storage(db) => {
                error!(error = %db, "Storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected path parameter");
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

fn lock(arena: &SharedArena) -> Result<MutexGuard<'_, Arena>, ApiError> {
    arena.lock().map_err(|_| {
        error!("Arena lock poisoned");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Arena unavailable")
    })
}

/// Builds the API router.
#[instrument(skip(arena))]
pub fn router(arena: SharedArena) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/players", post(create_player).get(list_players))
        .route("/players/{id}", get(get_player).delete(remove_player))
        .route("/jokenpo/play", post(play))
        .route("/jokenpo/history/{id}", get(history))
        .route("/jokenpo/scoreboard", get(scoreboard))
        .layer(middleware::from_fn(log_request))
        .with_state(arena)
}

/// Serves the API on `host:port` until Ctrl+C.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
#[instrument(skip(arena))]
pub async fn serve(arena: Arena, host: &str, port: u16) -> std::io::Result<()> {
    let app = router(Arc::new(Mutex::new(arena)));
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Server ready at http://{}:{}/", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    info!(method = %method, uri = %uri, "Incoming HTTP request");
    let response = next.run(req).await;
    info!(status = %response.status(), method = %method, uri = %uri, "Response sent");
    response
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the jokenpo arena. POST /players to register, then POST /jokenpo/play."
    }))
}

#[instrument(skip(arena, payload))]
async fn create_player(
    State(arena): State<SharedArena>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let Json(req) = payload?;
    let player = lock(&arena)?.register(&req.name)?;
    Ok((StatusCode::CREATED, Json(player)))
}

#[instrument(skip(arena))]
async fn list_players(State(arena): State<SharedArena>) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(lock(&arena)?.list().to_vec()))
}

#[instrument(skip(arena))]
async fn get_player(
    State(arena): State<SharedArena>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Player>, ApiError> {
    let Path(id) = path?;
    Ok(Json(lock(&arena)?.get(id)?.clone()))
}

#[instrument(skip(arena))]
async fn remove_player(
    State(arena): State<SharedArena>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Path(id) = path?;
    let name = lock(&arena)?.remove(id)?;
    Ok(Json(json!({ "message": format!("Player {} removed", name) })))
}

#[instrument(skip(arena, payload))]
async fn play(
    State(arena): State<SharedArena>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<PlayResult>, ApiError> {
    let Json(req) = payload?;
    let result = lock(&arena)?.play(req.player_id, req.player_move)?;
    Ok(Json(result))
}

#[instrument(skip(arena))]
async fn history(
    State(arena): State<SharedArena>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let Path(id) = path?;
    let arena = lock(&arena)?;
    let records = arena
        .history(id)?
        .into_iter()
        .map(MatchRecord::from)
        .collect();
    Ok(Json(records))
}

#[instrument(skip(arena))]
async fn scoreboard(
    State(arena): State<SharedArena>,
) -> Result<Json<Vec<ScoreboardRow>>, ApiError> {
    Ok(Json(lock(&arena)?.scoreboard()))
}

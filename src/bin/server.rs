use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loto_engine::{LotoEngine, LotoError, Resolution, StoredDraw, Ticket};

#[derive(Clone)]
struct AppState {
    engine: Arc<LotoEngine>,
}

#[derive(Debug, Deserialize)]
struct AddPlayerRequest {
    name: String,
    chosen_numbers: String,
    chosen_stars: String,
}

#[derive(Debug, Deserialize)]
struct GeneratePlayersRequest {
    num_players: usize,
}

#[derive(Debug, Deserialize)]
struct UpdatePrizeRequest {
    prize: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct PlayersResponse {
    players: Vec<Ticket>,
    total_players: usize,
    remaining_slots: usize,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: u64,
    remaining_slots: usize,
}

#[derive(Debug, Serialize)]
struct PrizeResponse {
    prize: f64,
}

#[derive(Debug, Serialize)]
struct SlotsResponse {
    total_players: usize,
    remaining_slots: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loto_server=debug,loto_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "loto.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Loto Engine Server");
    tracing::info!("📦 Database: {}", db_path);
    tracing::info!("🔌 Port: {}", port);

    let engine = LotoEngine::new(&db_path).await?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/v1/players",
            get(players_handler).post(add_player_handler).delete(delete_players_handler),
        )
        .route("/v1/players/generate", post(generate_players_handler))
        .route("/v1/draw", get(latest_draw_handler).post(draw_handler))
        .route("/v1/ranking", get(ranking_handler))
        .route("/v1/prize", get(prize_handler).put(update_prize_handler))
        .route("/v1/slots", get(slots_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🎰 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: loto_engine::VERSION.to_string(),
    })
}

async fn players_handler(State(state): State<AppState>) -> Result<Json<PlayersResponse>, AppError> {
    let players = state.engine.players().await?;
    let remaining_slots = state.engine.remaining_slots().await?;

    Ok(Json(PlayersResponse {
        total_players: players.len(),
        players,
        remaining_slots,
    }))
}

async fn add_player_handler(
    State(state): State<AppState>,
    Json(req): Json<AddPlayerRequest>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    tracing::debug!("Add player request: {:?}", req);

    let ticket = state
        .engine
        .register_ticket(&req.name, &req.chosen_numbers, &req.chosen_stars)
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn generate_players_handler(
    State(state): State<AppState>,
    Json(req): Json<GeneratePlayersRequest>,
) -> Result<(StatusCode, Json<Vec<Ticket>>), AppError> {
    let tickets = state.engine.generate_players(req.num_players).await?;
    Ok((StatusCode::CREATED, Json(tickets)))
}

async fn delete_players_handler(
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = state.engine.delete_players().await?;
    let remaining_slots = state.engine.remaining_slots().await?;

    Ok(Json(DeletedResponse {
        deleted,
        remaining_slots,
    }))
}

async fn draw_handler(State(state): State<AppState>) -> Result<Json<Resolution>, AppError> {
    let resolution = state.engine.run_draw().await?;
    Ok(Json(resolution))
}

async fn latest_draw_handler(
    State(state): State<AppState>,
) -> Result<Json<Option<StoredDraw>>, AppError> {
    Ok(Json(state.engine.latest_draw().await?))
}

async fn ranking_handler(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.engine.leaderboard().await?))
}

async fn prize_handler(State(state): State<AppState>) -> Result<Json<PrizeResponse>, AppError> {
    Ok(Json(PrizeResponse {
        prize: state.engine.prize().await?,
    }))
}

async fn update_prize_handler(
    State(state): State<AppState>,
    Json(req): Json<UpdatePrizeRequest>,
) -> Result<Json<PrizeResponse>, AppError> {
    let prize = state.engine.update_prize(&req.prize).await?;
    Ok(Json(PrizeResponse { prize }))
}

async fn slots_handler(State(state): State<AppState>) -> Result<Json<SlotsResponse>, AppError> {
    let total_players = state.engine.players().await?.len();
    let remaining_slots = state.engine.remaining_slots().await?;

    Ok(Json(SlotsResponse {
        total_players,
        remaining_slots,
    }))
}

// Error handling
struct AppError(LotoError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LotoError::InvalidTicket(_)
            | LotoError::InvalidName(_)
            | LotoError::InvalidPrize(_) => StatusCode::BAD_REQUEST,
            LotoError::DuplicatePlayer(_) | LotoError::PoolFull { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!("❌ Error: {} - {}", status, message);
        } else {
            tracing::warn!("⚠️ Rejected: {} - {}", status, message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<LotoError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::data::{BatchReport, BatchRequest, ProgramCategory, ScheduleReport, ScheduleRequest, Slot};
use crate::error::ScheduleError;
use crate::slots::build_slot_catalog;
use crate::solver;

type ApiError = (StatusCode, String);

fn error_response(e: ScheduleError) -> ApiError {
    let status = match e {
        ScheduleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ScheduleError::EmptyCatalog { .. } => StatusCode::NOT_FOUND,
    };
    (status, e.to_string())
}

fn request_rng(seed: Option<u64>) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

async fn solve_handler(Json(input): Json<ScheduleRequest>) -> Result<Json<ScheduleReport>, ApiError> {
    let mut rng = request_rng(input.options.seed);
    solver::solve(&input, &mut rng).map(Json).map_err(error_response)
}

async fn solve_all_handler(Json(input): Json<BatchRequest>) -> Result<Json<BatchReport>, ApiError> {
    let mut rng = request_rng(input.options.seed);
    solver::solve_all_programs(&input, &mut rng)
        .map(Json)
        .map_err(error_response)
}

#[derive(Debug, Deserialize)]
struct SlotQuery {
    category: ProgramCategory,
    #[serde(default)]
    weekends: Option<bool>,
}

async fn slots_handler(Query(query): Query<SlotQuery>) -> Json<Vec<Slot>> {
    Json(build_slot_catalog(query.category, query.weekends.unwrap_or(true)))
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/schedule/solve-all", post(solve_all_handler))
        .route("/v1/slots", get(slots_handler))
}

pub async fn run_server(config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app()).await
}

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};

use crate::cache::CacheStats;
use crate::controllers::football_controller::FootballController;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Administración de la caché (requiere JWT), montada bajo `/api/cache`
pub fn create_cache_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", delete(clear_cache))
        .route("/stats", get(cache_stats))
        .route("/:key", delete(delete_key))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    let controller = FootballController::new(state.football.clone());
    Json(controller.cache_stats().await)
}

async fn clear_cache(State(state): State<AppState>) -> Json<Value> {
    let controller = FootballController::new(state.football.clone());
    controller.clear_cache().await;
    Json(json!({ "message": "Cache cleared" }))
}

async fn delete_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = FootballController::new(state.football.clone());
    controller.invalidate(&key).await?;
    Ok(Json(json!({ "message": "Cache key removed", "key": key })))
}

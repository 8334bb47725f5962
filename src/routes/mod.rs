//! Rutas HTTP
//!
//! Ensambla los routers de cada área sobre el `AppState` compartido.

pub mod auth_routes;
pub mod cache_routes;
pub mod favorite_routes;
pub mod football_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/test", get(test_endpoint))
        .nest("/api", football_routes::create_football_router())
        .nest("/api/cache", cache_routes::create_cache_router(state.clone()))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/favorites", favorite_routes::create_favorite_router(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<Value> {
    Json(json!({
        "message": "Rodadex API funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

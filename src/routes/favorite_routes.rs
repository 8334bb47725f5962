use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::favorite_controller::FavoriteController;
use crate::dto::favorite_dto::{AddFavoriteRequest, FavoriteCheckResponse, FavoriteResponse};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::require_positive_id;

/// Favoritos del usuario autenticado, montados bajo `/api/favorites`
pub fn create_favorite_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/:team_id", delete(remove_favorite))
        .route("/:team_id/check", get(check_favorite))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<FavoriteResponse>>, AppError> {
    let controller = FavoriteController::new(state.pool.clone());
    Ok(Json(controller.list(user.user_id).await?))
}

async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), AppError> {
    let controller = FavoriteController::new(state.pool.clone());
    let favorite = controller.add(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let team_id = require_positive_id(Some(&team_id), "teamId")?;
    let controller = FavoriteController::new(state.pool.clone());
    controller.remove(user.user_id, team_id).await?;
    Ok(Json(json!({ "message": "Team removed from favorites" })))
}

async fn check_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<Json<FavoriteCheckResponse>, AppError> {
    let team_id = require_positive_id(Some(&team_id), "teamId")?;
    let controller = FavoriteController::new(state.pool.clone());
    Ok(Json(controller.check(user.user_id, team_id).await?))
}

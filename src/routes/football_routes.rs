use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::football_controller::{FootballController, FootballQuery};
use crate::dto::football_dto::{Cached, CombinedTeamDto, FixtureDto, MediaDto, StandingDto, TeamDto};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de datos de futebol, montadas bajo `/api`
pub fn create_football_router() -> Router<AppState> {
    Router::new()
        .route("/fixtures/next", get(next_fixtures))
        .route("/fixtures/league", get(league_fixtures))
        .route("/standings", get(standings))
        .route("/media/team", get(team_media))
        .route("/teams/search", get(search_teams))
        .route("/teams/combined", get(team_combined))
        .route("/teams/:id", get(team_by_id))
}

async fn next_fixtures(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<Cached<Vec<FixtureDto>>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.next_fixtures(&query).await?))
}

async fn league_fixtures(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<Cached<Vec<FixtureDto>>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.league_fixtures(&query).await?))
}

async fn standings(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<Cached<Vec<StandingDto>>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.standings(&query).await?))
}

async fn team_media(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<Cached<MediaDto>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.team_media(&query).await?))
}

async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<Cached<Vec<TeamDto>>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.search_teams(&query).await?))
}

async fn team_combined(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<CombinedTeamDto>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.team_combined(&query).await?))
}

async fn team_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cached<TeamDto>>, AppError> {
    let controller = FootballController::new(state.football.clone());
    Ok(Json(controller.team_by_id(&id).await?))
}

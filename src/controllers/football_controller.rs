//! Controlador de datos de futebol
//!
//! Traduce los parámetros de query string a llamadas del `FootballService`.

use serde::Deserialize;
use std::sync::Arc;

use crate::cache::CacheStats;
use crate::dto::football_dto::{Cached, CombinedTeamDto, FixtureDto, MediaDto, StandingDto, TeamDto};
use crate::services::football_service::FootballService;
use crate::utils::errors::AppError;
use crate::utils::validation::{next_count, non_empty, positive_or, require_positive_id, require_text};

/// Parámetros de query crudos; cada endpoint lee los que necesita
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootballQuery {
    pub team_id: Option<String>,
    pub league_id: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub round: Option<String>,
    pub name: Option<String>,
    pub next: Option<String>,
}

pub struct FootballController {
    service: Arc<FootballService>,
}

impl FootballController {
    pub fn new(service: Arc<FootballService>) -> Self {
        Self { service }
    }

    pub async fn next_fixtures(&self, query: &FootballQuery) -> Result<Cached<Vec<FixtureDto>>, AppError> {
        let team_id = require_positive_id(query.team_id.as_deref(), "teamId")?;
        let next = next_count(query.next.as_deref(), 5);

        Ok(self.service.team_next_fixtures(team_id, next).await?)
    }

    pub async fn league_fixtures(&self, query: &FootballQuery) -> Result<Cached<Vec<FixtureDto>>, AppError> {
        let defaults = self.service.defaults();
        let league_id = positive_or(query.league_id.as_deref(), defaults.league_id);
        let season = positive_or(query.season.as_deref(), defaults.season);
        let round = non_empty(query.round.as_deref());

        Ok(self.service.league_fixtures(league_id, season, round).await?)
    }

    pub async fn standings(&self, query: &FootballQuery) -> Result<Cached<Vec<StandingDto>>, AppError> {
        let defaults = self.service.defaults();
        let league_id = positive_or(query.league_id.as_deref(), defaults.league_id);
        let season = positive_or(query.season.as_deref(), defaults.season);

        Ok(self.service.league_standings(league_id, season).await?)
    }

    pub async fn team_media(&self, query: &FootballQuery) -> Result<Cached<MediaDto>, AppError> {
        let name = require_text(query.name.as_deref(), "name")?;

        Ok(self.service.team_media(&name).await?)
    }

    pub async fn search_teams(&self, query: &FootballQuery) -> Result<Cached<Vec<TeamDto>>, AppError> {
        let name = require_text(query.name.as_deref(), "name")?;
        let league_id = positive_or(query.league.as_deref(), self.service.defaults().league_id);

        Ok(self.service.search_teams(&name, league_id).await?)
    }

    pub async fn team_combined(&self, query: &FootballQuery) -> Result<CombinedTeamDto, AppError> {
        let name = require_text(query.name.as_deref(), "name")?;
        let next = next_count(query.next.as_deref(), 1);

        Ok(self.service.team_combined(&name, next).await?)
    }

    pub async fn team_by_id(&self, raw_id: &str) -> Result<Cached<TeamDto>, AppError> {
        let team_id = require_positive_id(Some(raw_id), "id")?;

        Ok(self.service.team_by_id(team_id).await?)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.service.cache_stats().await
    }

    pub async fn clear_cache(&self) {
        self.service.clear_cache().await;
        log::info!("🧹 Caché de futebol vaciada");
    }

    pub async fn invalidate(&self, key: &str) -> Result<(), AppError> {
        if self.service.invalidate(key).await {
            log::info!("🗑️ Clave de caché eliminada: {}", key);
            Ok(())
        } else {
            Err(AppError::NotFound(format!("cache key '{}' not found", key)))
        }
    }
}

//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::TtlCache;
use crate::clients::{build_http_client, ApiFootballClient, SportsDbClient};
use crate::config::environment::EnvironmentConfig;
use crate::services::football_service::FootballService;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub football: Arc<FootballService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, football: Arc<FootballService>) -> Self {
        Self {
            pool,
            jwt: JwtConfig::from(&config),
            config,
            football,
        }
    }

    /// Construir el estado con los clientes HTTP reales de los proveedores
    pub fn from_config(pool: PgPool, config: EnvironmentConfig) -> Result<Self, AppError> {
        let http_client = build_http_client(config.http_timeout)
            .map_err(|e| AppError::Configuration(format!("Error creando cliente HTTP: {}", e)))?;

        let football = ApiFootballClient::new(
            http_client.clone(),
            config.football_api_base.clone(),
            config.football_api_key.clone(),
        );
        let media = SportsDbClient::new(
            http_client,
            config.thesportsdb_base.clone(),
            config.thesportsdb_key.clone(),
        );

        let service = FootballService::new(
            Arc::new(football),
            Arc::new(media),
            TtlCache::new(),
            config.league_defaults,
        );

        Ok(Self::new(pool, config, Arc::new(service)))
    }
}

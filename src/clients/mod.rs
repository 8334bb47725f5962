//! Clients - HTTP Clients for External APIs
//!
//! This module contains the upstream gateway: one thin client per provider,
//! each one behind a trait so the aggregation service can be tested with
//! in-memory providers.

pub mod api_football_client;
pub mod sportsdb_client;

pub use api_football_client::ApiFootballClient;
pub use sportsdb_client::SportsDbClient;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// The upstream provider could not deliver a usable response
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Fixtures / standings / teams provider (API-Football)
#[async_trait]
pub trait FootballProvider: Send + Sync {
    async fn fixtures_by_team(&self, team_id: i64, season: i32) -> Result<Value, UpstreamError>;

    async fn fixtures_by_league(
        &self,
        league_id: i64,
        season: i32,
        round: Option<&str>,
    ) -> Result<Value, UpstreamError>;

    async fn standings_by_league(&self, league_id: i64, season: i32) -> Result<Value, UpstreamError>;

    async fn team_by_id(&self, team_id: i64) -> Result<Value, UpstreamError>;

    async fn search_teams(&self, query: &str, league_id: i64) -> Result<Value, UpstreamError>;
}

/// Team media provider (TheSportsDB)
#[async_trait]
pub trait MediaProvider: Send + Sync {
    async fn search_team_media(&self, team_name: &str) -> Result<Value, UpstreamError>;
}

/// Shared HTTP client for every provider
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rodadex-api/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Read a provider response as JSON, rejecting non-2xx statuses and invalid bodies
pub(crate) async fn read_json_body(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| UpstreamError::Malformed(format!("invalid JSON body: {}", e)))
}

//! Cliente HTTP para API-Football
//!
//! Fixtures, clasificación y equipos. Las respuestas vienen envueltas en
//! `{ "response": [...], "errors": ... }`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{read_json_body, FootballProvider, UpstreamError};

const API_FOOTBALL_HOST: &str = "v3.football.api-sports.io";

/// Cliente HTTP para API-Football
#[derive(Debug, Clone)]
pub struct ApiFootballClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiFootballClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        log::info!("🌐 API-Football GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header("x-apisports-key", &self.api_key)
            .header("x-rapidapi-host", API_FOOTBALL_HOST)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ API-Football no disponible: {}", e);
                UpstreamError::from(e)
            })?;

        let body = read_json_body(response).await?;
        validate_envelope(&body)?;
        Ok(body)
    }
}

/// Comprobar el envoltorio de API-Football
///
/// La API reporta errores de cuota o de clave con HTTP 200 y un campo
/// `errors` no vacío, así que ese caso también cuenta como respuesta inválida.
pub fn validate_envelope(body: &Value) -> Result<(), UpstreamError> {
    let has_errors = match body.get("errors") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        _ => false,
    };

    if has_errors {
        return Err(UpstreamError::Malformed(format!(
            "provider reported errors: {}",
            body["errors"]
        )));
    }

    match body.get("response") {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(UpstreamError::Malformed(
            "missing `response` array".to_string(),
        )),
    }
}

#[async_trait]
impl FootballProvider for ApiFootballClient {
    async fn fixtures_by_team(&self, team_id: i64, season: i32) -> Result<Value, UpstreamError> {
        self.get(
            "fixtures",
            &[("team", team_id.to_string()), ("season", season.to_string())],
        )
        .await
    }

    async fn fixtures_by_league(
        &self,
        league_id: i64,
        season: i32,
        round: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let mut params = vec![("league", league_id.to_string()), ("season", season.to_string())];
        if let Some(round) = round {
            params.push(("round", round.to_string()));
        }
        self.get("fixtures", &params).await
    }

    async fn standings_by_league(&self, league_id: i64, season: i32) -> Result<Value, UpstreamError> {
        self.get(
            "standings",
            &[("league", league_id.to_string()), ("season", season.to_string())],
        )
        .await
    }

    async fn team_by_id(&self, team_id: i64) -> Result<Value, UpstreamError> {
        self.get("teams", &[("id", team_id.to_string())]).await
    }

    async fn search_teams(&self, query: &str, league_id: i64) -> Result<Value, UpstreamError> {
        self.get(
            "teams",
            &[("search", query.trim().to_string()), ("league", league_id.to_string())],
        )
        .await
    }
}

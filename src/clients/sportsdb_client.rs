//! Cliente HTTP para TheSportsDB (escudos, banners, estadios)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{read_json_body, MediaProvider, UpstreamError};

#[derive(Debug, Clone)]
pub struct SportsDbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SportsDbClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

/// `teams` puede ser un array o `null` cuando no hay coincidencias
pub fn validate_media_body(body: &Value) -> Result<(), UpstreamError> {
    match body {
        Value::Object(map) => match map.get("teams") {
            None | Some(Value::Null) | Some(Value::Array(_)) => Ok(()),
            Some(other) => Err(UpstreamError::Malformed(format!(
                "unexpected `teams` field: {}",
                other
            ))),
        },
        _ => Err(UpstreamError::Malformed(
            "media response is not a JSON object".to_string(),
        )),
    }
}

#[async_trait]
impl MediaProvider for SportsDbClient {
    async fn search_team_media(&self, team_name: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/{}/searchteams.php", self.base_url, self.api_key);
        log::info!("🖼️ TheSportsDB búsqueda de media: {}", team_name);

        let response = self
            .client
            .get(&url)
            .query(&[("t", team_name.trim())])
            .send()
            .await?;

        let body = read_json_body(response).await?;
        validate_media_body(&body)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_body_with_null_teams_is_valid() {
        assert!(validate_media_body(&json!({ "teams": null })).is_ok());
        assert!(validate_media_body(&json!({ "teams": [] })).is_ok());
    }

    #[test]
    fn test_media_body_must_be_object() {
        assert!(validate_media_body(&json!("<html>")).is_err());
        assert!(validate_media_body(&json!({ "teams": "nope" })).is_err());
    }
}

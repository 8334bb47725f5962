use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::favorite::Favorite;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    #[validate(range(min = 1))]
    pub team_id: i64,

    #[validate(length(min = 1, max = 120))]
    pub team_name: String,

    #[validate(length(max = 500))]
    pub team_logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub team_id: i64,
    pub team_name: String,
    pub team_logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            team_id: favorite.team_id,
            team_name: favorite.team_name,
            team_logo: favorite.team_logo,
            created_at: favorite.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckResponse {
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_favorite_request_uses_camel_case() {
        let request: AddFavoriteRequest = serde_json::from_value(json!({
            "teamId": 131,
            "teamName": "Corinthians",
        }))
        .unwrap();

        assert_eq!(request.team_id, 131);
        assert!(request.team_logo.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_favorite_request_rejects_bad_values() {
        let request = AddFavoriteRequest {
            team_id: 0,
            team_name: String::new(),
            team_logo: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("team_id"));
        assert!(fields.contains_key("team_name"));
    }

    #[test]
    fn test_check_response_shape() {
        let body = serde_json::to_value(FavoriteCheckResponse { is_favorite: true }).unwrap();
        assert_eq!(body, json!({ "isFavorite": true }));
    }
}

//! Modelo de Favorite
//!
//! Un equipo marcado como favorito por un usuario; `(user_id, team_id)` es único.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: i64,
    pub team_name: String,
    pub team_logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

use crate::models::favorite::Favorite;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Favoritos del usuario, más recientes primero
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, AppError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, team_id, team_name, team_logo, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    pub async fn find(&self, user_id: Uuid, team_id: i64) -> Result<Option<Favorite>, AppError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, team_id, team_name, team_logo, created_at
            FROM favorites
            WHERE user_id = $1 AND team_id = $2
            "#,
        )
        .bind(user_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        team_id: i64,
        team_name: &str,
        team_logo: Option<&str>,
    ) -> Result<Favorite, AppError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (id, user_id, team_id, team_name, team_logo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, team_id, team_name, team_logo, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(team_id)
        .bind(team_name)
        .bind(team_logo)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict(format!("Team {} is already a favorite", team_id));
                }
            }
            AppError::Database(e)
        })?;

        Ok(favorite)
    }

    /// Devuelve el número de filas eliminadas (0 o 1)
    pub async fn delete(&self, user_id: Uuid, team_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND team_id = $2")
            .bind(user_id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

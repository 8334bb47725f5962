use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::favorite_dto::{AddFavoriteRequest, FavoriteCheckResponse, FavoriteResponse};
use crate::repositories::favorite_repository::FavoriteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct FavoriteController {
    repository: FavoriteRepository,
}

impl FavoriteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FavoriteRepository::new(pool),
        }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<FavoriteResponse>, AppError> {
        let favorites = self.repository.list_by_user(user_id).await?;
        Ok(favorites.into_iter().map(FavoriteResponse::from).collect())
    }

    pub async fn add(&self, user_id: Uuid, request: AddFavoriteRequest) -> Result<FavoriteResponse, AppError> {
        request.validate()?;

        if self.repository.find(user_id, request.team_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Team {} is already a favorite",
                request.team_id
            )));
        }

        let team_logo = request.team_logo.as_deref().map(str::trim).filter(|l| !l.is_empty());
        let favorite = self
            .repository
            .create(user_id, request.team_id, request.team_name.trim(), team_logo)
            .await?;

        log::info!("⭐ Favorito añadido: usuario {} equipo {}", user_id, favorite.team_id);
        Ok(FavoriteResponse::from(favorite))
    }

    pub async fn remove(&self, user_id: Uuid, team_id: i64) -> Result<(), AppError> {
        match self.repository.delete(user_id, team_id).await? {
            0 => Err(not_found_error("Favorite", &team_id.to_string())),
            _ => Ok(()),
        }
    }

    pub async fn check(&self, user_id: Uuid, team_id: i64) -> Result<FavoriteCheckResponse, AppError> {
        let is_favorite = self.repository.find(user_id, team_id).await?.is_some();
        Ok(FavoriteCheckResponse { is_favorite })
    }
}

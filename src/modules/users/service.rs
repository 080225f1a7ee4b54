use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::User;
use crate::utils::errors::AppError;

const USER_COLUMNS: &str = "id, email, is_verified, avatar_url, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn mark_email_verified(db: &PgPool, email: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_verified = TRUE, updated_at = NOW()
             WHERE email = $1
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to mark email verified")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn update_avatar(
        db: &PgPool,
        user_id: Uuid,
        avatar_url: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET avatar_url = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(avatar_url)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to update avatar")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}

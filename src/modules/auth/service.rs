use serde_json::Map;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest, TokenPurpose};
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, resolve_subject};
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let existing_user = UserService::get_user_by_email(db, &dto.email).await?;

        if existing_user.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password)
             VALUES ($1, $2)
             RETURNING id, email, is_verified, avatar_url, created_at, updated_at",
        )
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip_all)]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            email: String,
            password: String,
            is_verified: bool,
            avatar_url: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, password, is_verified, avatar_url, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        if !row.is_verified {
            return Err(AppError::unauthorized("Email address is not verified"));
        }

        let access_token = create_access_token(&row.email, Map::new(), None, jwt_config)
            .map_err(AppError::internal)?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: User {
                id: row.id,
                email: row.email,
                is_verified: row.is_verified,
                avatar_url: row.avatar_url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }

    /// Resolves a verification token back to the email it was issued for
    /// and marks that account verified. Every token failure collapses to
    /// the same client-visible message; the real reason is logged.
    #[instrument(skip_all)]
    pub async fn confirm_email(
        db: &PgPool,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let email = resolve_subject(token, TokenPurpose::EmailVerification, jwt_config)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Email verification token rejected");
                AppError::bad_request(anyhow::anyhow!("Invalid or expired verification link"))
            })?;

        let user = UserService::get_user_by_email(db, &email)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("Invalid or expired verification link"))
            })?;

        if user.is_verified {
            return Ok("Email is already confirmed".to_string());
        }

        UserService::mark_email_verified(db, &email).await?;

        Ok("Email confirmed successfully".to_string())
    }
}

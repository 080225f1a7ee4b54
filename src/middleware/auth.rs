use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::TokenPurpose;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::resolve_subject;

/// Extractor for routes that require a valid access token.
///
/// Resolves the bearer token's subject (the account email) and loads the
/// user row. All token failures — malformed, bad signature, expired,
/// missing subject, wrong purpose — collapse to the same 401 so a client
/// cannot probe which check failed; the internal reason is logged.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let subject =
            resolve_subject(token, TokenPurpose::Access, &state.jwt_config).map_err(|e| {
                tracing::debug!(reason = %e, "Access token rejected");
                AppError::unauthorized("Invalid or expired token")
            })?;

        let user = UserService::get_user_by_email(&state.db, &subject)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(user))
    }
}

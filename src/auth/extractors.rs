use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::{JwtKeys, TokenKind};
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Authenticated caller: a valid access token resolved to an active user.
#[derive(Debug)]
pub struct AuthUser(pub User);

/// Authenticated caller with the superuser flag set.
/// Satisfies everything `AuthUser` does plus the superuser tier.
#[derive(Debug)]
pub struct Superuser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::AuthenticationRequired("Missing Authorization header".into())
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| {
                ApiError::AuthenticationRequired("Invalid Authorization header".into())
            })?;

        let keys = JwtKeys::from_ref(state);
        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(ApiError::AuthenticationRequired(
                    "Invalid or expired token".into(),
                ));
            }
        };

        if claims.kind != TokenKind::Access {
            return Err(ApiError::AuthenticationRequired(
                "Access token required".into(),
            ));
        }

        let user = state.users.get(claims.sub).await?.ok_or_else(|| {
            ApiError::AuthenticationRequired("Invalid or expired token".into())
        })?;

        // Деактивированный пользователь приравнен к анонимному.
        if !user.is_active {
            warn!(user_id = user.id, "token for deactivated user");
            return Err(ApiError::AuthenticationRequired(
                "Invalid or expired token".into(),
            ));
        }

        Ok(AuthUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Superuser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            warn!(user_id = user.id, "superuser tier required");
            return Err(ApiError::AuthorizationDenied("Forbidden".into()));
        }
        Ok(Superuser(user))
    }
}

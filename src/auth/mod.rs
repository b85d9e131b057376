pub mod jwt;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;

use crate::{domain::UserId, error::AppError, state::AppState};

/// Acting user resolved from the bearer token. Used as the audit actor of
/// every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized())?;

        let claims = state.jwt.verify_token(bearer.token()).map_err(|err| {
            tracing::debug!(error = %err, "rejected bearer token");
            AppError::unauthorized()
        })?;

        let user_id = claims
            .sub
            .user_id()
            .ok_or_else(|| AppError::bad_request("invalid user id"))?;

        Ok(AuthenticatedUser { user_id })
    }
}

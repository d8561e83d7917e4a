//! JWT authentication middleware and role guards.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Actor, Role};
use crate::errors::AppError;
use crate::services::Claims;

fn actor_from_claims(claims: Claims) -> Actor {
    Actor {
        id: claims.sub,
        username: claims.username,
        role: Role::from(claims.role.as_str()),
        is_superuser: claims.is_superuser,
    }
}

fn bearer_token(parts_headers: &axum::http::HeaderMap) -> Option<&str> {
    parts_headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
}

/// JWT authentication middleware.
///
/// Validates the bearer token and injects the resolved [`Actor`] into the
/// request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(actor_from_claims(claims));

    Ok(next.run(request).await)
}

/// Back-office guard layered on top of `auth_middleware`.
pub async fn staff_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let actor = request
        .extensions()
        .get::<Actor>()
        .ok_or(AppError::Unauthorized)?;

    if !actor.is_staff() {
        return Err(AppError::forbidden("Access denied"));
    }

    Ok(next.run(request).await)
}

/// Optional viewer identity for public pages whose payload depends on who
/// is looking (the tutor detail paywall). An absent or invalid token just
/// yields an anonymous viewer.
pub struct MaybeActor(pub Option<Actor>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeActor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = bearer_token(&parts.headers)
            .and_then(|token| state.auth_service.verify_token(token).ok())
            .map(actor_from_claims);

        Ok(MaybeActor(actor))
    }
}

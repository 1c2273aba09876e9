//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::db::UserKey;
use crate::error::Result;
use crate::services::auth::{bearer_token, AuthProvider, Identity};
use crate::AppState;

/// Authenticated user stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub identity: Identity,
    pub key: UserKey,
}

/// Auth middleware - resolves the bearer token to a user
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = bearer_token(header)
        .and_then(|token| state.auth.authenticate(token))
        .map_err(|err| {
            tracing::warn!(path = %request.uri().path(), error = %err, "rejected request");
            err
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        key: identity.user_key(),
        identity,
    });

    Ok(next.run(request).await)
}

//! Bearer-token authentication middleware.
//!
//! Verifies the access token and loads the user row so handlers can read it
//! from request extensions. Role and ownership decisions stay with the
//! handlers, which apply the models' capability checks.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError, repositories::users as user_repo, state::AppState,
    utils::jwt::verify_access_token,
};

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Missing access token".to_string()))?
        .to_string();

    let claims = verify_access_token(&token, &state.config)
        .map_err(|_| AppError::Unauthorized("Invalid or expired access token".to_string()))?;

    let user = user_repo::find_user_by_id(&state.pool, &claims.sub)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(rest.trim_start())
    } else {
        None
    }
}

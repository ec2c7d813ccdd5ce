//! Registration, login, and the refresh-token session flow.
//!
//! The refresh token never leaves the http-only cookie; rotation makes the
//! previous token single-use because the session keeps only the latest
//! fingerprint.

use std::time::Duration as StdDuration;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        session::Session,
        user::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse},
    },
    repositories::{sessions as session_repo, users as user_repo},
    state::AppState,
    utils::{
        cookies::{
            build_clear_refresh_cookie, build_refresh_cookie, extract_cookie_value, CookieOptions,
            REFRESH_COOKIE_NAME,
        },
        jwt::{create_access_token, create_refresh_token, token_fingerprint, verify_refresh_token},
        password::{hash_password, verify_password},
    },
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    if user_repo::find_user_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let roles = payload.recognized_roles();
    let user = User::new(payload.username, payload.email, password_hash, roles);
    user_repo::insert_user(&state.pool, &user).await?;

    tracing::info!(username = %user.username, "Registered new user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let user = user_repo::find_user_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = create_access_token(&user.id, &user.username, &user.roles, &state.config)?;

    let session_id = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(state.config.session_expiration_days as i64);
    let refresh_token = create_refresh_token(&user.id, &session_id, expires_at, &state.config)?;

    let session = Session::new(
        session_id,
        user.id.clone(),
        token_fingerprint(&refresh_token),
        expires_at,
    );
    session_repo::insert_session(&state.pool, &session).await?;

    tracing::info!(username = %user.username, session_id = %session.id, "User logged in");
    Ok((
        refresh_cookie_headers(&refresh_token, &state.config)?,
        Json(LoginResponse { access_token }),
    ))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let refresh_token = refresh_token_from_headers(&headers)?;
    let claims = verify_refresh_token(&refresh_token, &state.config)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let session = session_repo::find_session_by_id(&state.pool, &claims.sid)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if !session.accepts(&token_fingerprint(&refresh_token), Utc::now()) {
        return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
    }

    let user = user_repo::find_user_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    let access_token = create_access_token(&user.id, &user.username, &user.roles, &state.config)?;

    let expires_at = Utc::now() + Duration::days(state.config.session_expiration_days as i64);
    let new_refresh_token =
        create_refresh_token(&user.id, &session.id, expires_at, &state.config)?;
    session_repo::rotate_session(
        &state.pool,
        &session.id,
        &token_fingerprint(&new_refresh_token),
        expires_at,
    )
    .await?;

    Ok((
        refresh_cookie_headers(&new_refresh_token, &state.config)?,
        Json(LoginResponse { access_token }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    let refresh_token = refresh_token_from_headers(&headers)?;
    let claims = verify_refresh_token(&refresh_token, &state.config)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    session_repo::revoke_session(&state.pool, &claims.sid).await?;
    tracing::info!(session_id = %claims.sid, "Session revoked");

    let mut response_headers = HeaderMap::new();
    let cookie = build_clear_refresh_cookie(cookie_options(&state.config));
    response_headers.insert(header::SET_COOKIE, header_value(&cookie)?);
    Ok((response_headers, Json(json!({"message": "Logged out"}))))
}

fn cookie_options(config: &Config) -> CookieOptions {
    CookieOptions {
        secure: config.cookie_secure,
        same_site: config.cookie_same_site,
    }
}

fn refresh_token_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, REFRESH_COOKIE_NAME))
        .ok_or_else(|| AppError::Unauthorized("Refresh token not found".to_string()))
}

fn refresh_cookie_headers(token: &str, config: &Config) -> Result<HeaderMap, AppError> {
    let max_age = StdDuration::from_secs(config.session_expiration_days * 24 * 60 * 60);
    let cookie = build_refresh_cookie(token, max_age, cookie_options(config));
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&cookie)?);
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| AppError::InternalServerError(e.into()))
}

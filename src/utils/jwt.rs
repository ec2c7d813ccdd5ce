//! Signed access and refresh tokens.
//!
//! Access tokens carry the user's identity and roles; refresh tokens carry
//! only the session id they belong to. Both are HS256 and validated against
//! the configured issuer and audience.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User id.
    pub sub: String,
    /// Session id backing this token.
    pub sid: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

pub fn create_access_token(
    user_id: &str,
    username: &str,
    roles: &[String],
    config: &Config,
) -> anyhow::Result<String> {
    let now = Utc::now();
    let exp = now + Duration::minutes(config.access_token_expiration_minutes as i64);
    let claims = AccessClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        roles: roles.to_vec(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;
    Ok(token)
}

pub fn create_refresh_token(
    user_id: &str,
    session_id: &str,
    expires_at: DateTime<Utc>,
    config: &Config,
) -> anyhow::Result<String> {
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        exp: expires_at.timestamp(),
        iat: Utc::now().timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;
    Ok(token)
}

fn validation_for(config: &Config) -> Validation {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_audience(&[&config.jwt_audience]);
    validation
}

pub fn verify_access_token(token: &str, config: &Config) -> anyhow::Result<AccessClaims> {
    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation_for(config),
    )?;
    Ok(token_data.claims)
}

pub fn verify_refresh_token(token: &str, config: &Config) -> anyhow::Result<RefreshClaims> {
    let token_data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation_for(config),
    )?;
    Ok(token_data.claims)
}

/// SHA-256 hex fingerprint of a token, as persisted on the session row.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cookies::SameSite;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".into(),
            jwt_secret: "a_secure_token_that_is_long_enough_123".into(),
            jwt_issuer: "rental-backend".into(),
            jwt_audience: "rental-clients".into(),
            access_token_expiration_minutes: 20,
            session_expiration_days: 3,
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            cors_allow_origins: vec!["*".into()],
            admin_username: "admin".into(),
            admin_password: "ChangeMePassword123!".into(),
        }
    }

    #[test]
    fn access_token_roundtrip_preserves_identity_and_roles() {
        let config = test_config();
        let roles = vec!["Tenant".to_string(), "Owner".to_string()];
        let token = create_access_token("user-123", "bob", &roles, &config).expect("create");
        let claims = verify_access_token(&token, &config).expect("verify");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.roles, roles);
    }

    #[test]
    fn refresh_token_roundtrip_preserves_session_id() {
        let config = test_config();
        let expires_at = Utc::now() + Duration::days(3);
        let token =
            create_refresh_token("user-123", "session-9", expires_at, &config).expect("create");
        let claims = verify_refresh_token(&token, &config).expect("verify");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.sid, "session-9");
    }

    #[test]
    fn verification_rejects_wrong_audience() {
        let config = test_config();
        let token =
            create_access_token("user-123", "bob", &["Tenant".to_string()], &config).unwrap();

        let mut other = test_config();
        other.jwt_audience = "another-app".into();
        assert!(verify_access_token(&token, &other).is_err());
    }

    #[test]
    fn verification_rejects_expired_refresh_token() {
        let config = test_config();
        let expired = Utc::now() - Duration::days(1);
        let token = create_refresh_token("user-123", "session-9", expired, &config).unwrap();
        assert!(verify_refresh_token(&token, &config).is_err());
    }

    #[test]
    fn fingerprints_differ_per_token() {
        let a = token_fingerprint("token-a");
        let b = token_fingerprint("token-b");
        assert_ne!(a, b);
        assert_eq!(a, token_fingerprint("token-a"));
        assert_eq!(a.len(), 64);
    }
}

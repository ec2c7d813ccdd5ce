//! Models for user accounts, roles, and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_username;

/// Database representation of a user account.
///
/// Roles are stored as a `TEXT[]` column holding canonical role names; a user
/// may hold any subset of the recognized roles.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: String,
    /// Immutable username used for login.
    pub username: String,
    pub email: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recognized roles. Role names submitted at registration that do not parse
/// into one of these are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Tenant,
    Owner,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Tenant, UserRole::Owner, UserRole::Admin];

    /// Canonical name as stored in the database and embedded in claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Tenant => "Tenant",
            UserRole::Owner => "Owner",
            UserRole::Admin => "Admin",
        }
    }

    /// Parses a role name, tolerating casing differences.
    pub fn parse(value: &str) -> Option<UserRole> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tenant" => Some(UserRole::Tenant),
            "owner" => Some(UserRole::Owner),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        roles: Vec<UserRole>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn is_tenant(&self) -> bool {
        self.has_role(UserRole::Tenant)
    }

    pub fn is_owner(&self) -> bool {
        self.has_role(UserRole::Owner)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }
}

/// Payload submitted to create a new account.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    /// Requested role names; unrecognized entries are ignored.
    #[serde(default)]
    pub roles: Vec<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Returns the subset of requested roles that are recognized.
    pub fn recognized_roles(&self) -> Vec<UserRole> {
        let mut roles: Vec<UserRole> = self
            .roles
            .iter()
            .filter_map(|name| UserRole::parse(name))
            .collect();
        roles.dedup();
        roles
    }
}

/// Credentials submitted by a user attempting to authenticate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body returned after a successful login or refresh. The refresh token
/// travels only in the http-only cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Public-facing representation of a user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a user account row as stored in the database.
///
/// The struct deliberately does not derive `Serialize`: the stored password
/// hash must never reach a response body, so everything going out over HTTP
/// is converted to [`UserResponse`] first.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique identifier for the user.
    pub id: i32,
    /// Display name, unique across accounts.
    pub username: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// The bcrypt hash of the user's password.
    pub password_hash: String,
    /// Timestamp of when the account was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the account.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `UserRepository::create`. The password has already been
/// hashed by the time this struct exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The public shape of a user account returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Partial-update payload for `PUT /users/me`. Absent fields are left as they
/// are.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 3, max = 30),
        regex(
            path = "crate::auth::USERNAME_REGEX",
            message = "username may only contain letters, digits, underscores and hyphens"
        )
    )]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

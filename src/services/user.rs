use lazy_static::lazy_static;
use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{TokenPair, TokenService};
use crate::error::AppError;
use crate::models::user::{NewUser, User};
use crate::repository::{RepoError, UserRepository};

/// The one message every credential failure carries, so a caller cannot
/// tell an unknown email from a wrong password.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

lazy_static! {
    // Digest compared against when the email is unknown, so both login
    // failure paths perform one bcrypt verification and take similar time.
    static ref DUMMY_PASSWORD_HASH: String =
        hash_password("tasklane-dummy-credential").expect("bcrypt accepts a static input");
}

/// Account workflows: registration, login, profile reads and updates, and
/// session refresh.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Creates an account with a freshly hashed password.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;
        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        match self.users.create(new_user).await {
            Ok(user) => Ok(user),
            Err(RepoError::AlreadyExists) => Err(AppError::Conflict(
                "a user with this email or username already exists".into(),
            )),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    /// Checks credentials and issues a token pair.
    ///
    /// Unknown email and wrong password produce byte-identical errors, and
    /// the unknown-email path still verifies against a dummy hash.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => user,
            Err(RepoError::NotFound) => {
                let _ = verify_password(password, &DUMMY_PASSWORD_HASH);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        log::info!("user {} logged in", user.id);
        Ok(self.tokens.issue(user.id)?)
    }

    pub async fn get_details(&self, user_id: i32) -> Result<User, AppError> {
        match self.users.find_by_id(user_id).await {
            Ok(user) => Ok(user),
            Err(RepoError::NotFound) => Err(AppError::NotFound("user not found".into())),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    /// Applies a partial profile update. A changed email is pre-checked
    /// against other accounts; the repository's uniqueness constraint
    /// remains the last word either way.
    pub async fn update_details(
        &self,
        user_id: i32,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<User, AppError> {
        if let Some(email) = email.as_deref() {
            match self.users.find_by_email(email).await {
                Ok(existing) if existing.id != user_id => {
                    return Err(AppError::Conflict(
                        "a user with this email already exists".into(),
                    ));
                }
                Ok(_) | Err(RepoError::NotFound) => {}
                Err(e) => return Err(AppError::Internal(e.to_string())),
            }
        }

        let mut user = self.get_details(user_id).await?;
        if let Some(username) = username {
            user.username = username;
        }
        if let Some(email) = email {
            user.email = email;
        }

        match self.users.update(&user).await {
            Ok(user) => Ok(user),
            Err(RepoError::AlreadyExists) => Err(AppError::Conflict(
                "a user with this email or username already exists".into(),
            )),
            Err(RepoError::NotFound) => Err(AppError::NotFound("user not found".into())),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    /// Issues a fresh token pair for an already-verified refresh subject.
    ///
    /// The account is looked up again so a refresh token cannot outlive its
    /// user; a vanished account reads as an authentication failure, not a
    /// server fault.
    pub async fn refresh_session(&self, user_id: i32) -> Result<TokenPair, AppError> {
        match self.users.find_by_id(user_id).await {
            Ok(user) => Ok(self.tokens.issue(user.id)?),
            Err(RepoError::NotFound) => Err(AppError::Unauthorized(
                "refresh token subject no longer exists".into(),
            )),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }
}

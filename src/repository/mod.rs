//!
//! # Persistence
//!
//! Repository traits for users and tasks, with two implementations each: a
//! PostgreSQL one used by the running server and an in-memory one used by
//! tests (and usable for development without a database). The service layer
//! only ever sees the traits.

use async_trait::async_trait;
use std::fmt;

use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

/// Errors surfaced by repository operations.
///
/// Repositories stay HTTP-agnostic: translating these into response-shaped
/// errors is the service layer's job, which knows whether a missing row is a
/// 404, a 401 or a server fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No row matched the lookup.
    NotFound,
    /// A uniqueness constraint rejected the write.
    AlreadyExists,
    /// Any other database-level failure.
    Database(String),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RepoError::NotFound => write!(f, "record not found"),
            RepoError::AlreadyExists => write!(f, "record already exists"),
            RepoError::Database(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for RepoError {}

impl From<sqlx::Error> for RepoError {
    fn from(error: sqlx::Error) -> RepoError {
        match &error {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            // 23505 is Postgres for unique_violation.
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                RepoError::AlreadyExists
            }
            _ => RepoError::Database(error.to_string()),
        }
    }
}

/// Store of user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with `AlreadyExists` when the username or
    /// email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<User, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<User, RepoError>;

    /// Persists the mutable fields of an existing user and bumps
    /// `updated_at`. The returned row reflects the stored state.
    async fn update(&self, user: &User) -> Result<User, RepoError>;
}

/// Store of tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, new_task: NewTask) -> Result<Task, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Task, RepoError>;

    /// All tasks owned by a user, ordered by id ascending.
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Task>, RepoError>;

    /// Persists the mutable fields of an existing task and bumps
    /// `updated_at`. The returned row reflects the stored state.
    async fn update(&self, task: &Task) -> Result<Task, RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use crate::repository::{RepoError, TaskRepository, UserRepository};

/// PostgreSQL implementation of [`UserRepository`], backed by the `users`
/// table from the migrations.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash, created_at, updated_at",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET username = $1, email = $2, password_hash = $3, updated_at = now()
             WHERE id = $4
             RETURNING id, username, email, password_hash, created_at, updated_at",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

/// PostgreSQL implementation of [`TaskRepository`], backed by the `tasks`
/// table from the migrations.
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, new_task: NewTask) -> Result<Task, RepoError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, content, user_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, content, completed, user_id, created_at, updated_at",
        )
        .bind(&new_task.title)
        .bind(&new_task.content)
        .bind(new_task.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_by_id(&self, id: i32) -> Result<Task, RepoError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, content, completed, user_id, created_at, updated_at
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Task>, RepoError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, content, completed, user_id, created_at, updated_at
             FROM tasks WHERE user_id = $1
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task, RepoError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = $1, content = $2, completed = $3, updated_at = now()
             WHERE id = $4
             RETURNING id, title, content, completed, user_id, created_at, updated_at",
        )
        .bind(&task.title)
        .bind(&task.content)
        .bind(task.completed)
        .bind(task.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

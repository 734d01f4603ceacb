use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use crate::repository::{RepoError, TaskRepository, UserRepository};

/// In-memory implementation of [`UserRepository`].
///
/// Mirrors the database behavior the service layer depends on, including
/// the uniqueness of usernames and emails, so tests exercise the same
/// paths the Postgres repository takes. Data is lost on restart.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i32, User>>,
    next_id: AtomicI32,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(RepoError::AlreadyExists);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, RepoError> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepoError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if users
            .values()
            .any(|u| u.id != user.id && (u.username == user.username || u.email == user.email))
        {
            return Err(RepoError::AlreadyExists);
        }

        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        users.insert(updated.id, updated.clone());
        Ok(updated)
    }
}

/// In-memory implementation of [`TaskRepository`].
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<i32, Task>>,
    next_id: AtomicI32,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, new_task: NewTask) -> Result<Task, RepoError> {
        let mut tasks = self.tasks.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let task = Task {
            id,
            title: new_task.title,
            content: new_task.content,
            completed: false,
            user_id: new_task.user_id,
            created_at: now,
            updated_at: now,
        };
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i32) -> Result<Task, RepoError> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Task>, RepoError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.id);
        Ok(owned)
    }

    async fn update(&self, task: &Task) -> Result<Task, RepoError> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&task.id) {
            return Err(RepoError::NotFound);
        }

        let mut updated = task.clone();
        updated.updated_at = Utc::now();
        tasks.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tasks = self.tasks.write().await;
        if tasks.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$notarealhash".to_string(),
        }
    }

    fn new_task(title: &str, user_id: i32) -> NewTask {
        NewTask {
            title: title.to_string(),
            content: String::new(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.create(new_user("alice", "alice@example.com")).await.unwrap();
        let bob = repo.create(new_user("bob", "bob@example.com")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(alice.created_at, alice.updated_at);
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let same_email = repo.create(new_user("alice2", "alice@example.com")).await;
        assert_eq!(same_email.unwrap_err(), RepoError::AlreadyExists);

        let same_username = repo.create(new_user("alice", "other@example.com")).await;
        assert_eq!(same_username.unwrap_err(), RepoError::AlreadyExists);
    }

    #[tokio::test]
    async fn test_find_user_by_email_and_id() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let by_email = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id.username, "alice");

        assert_eq!(
            repo.find_by_email("nobody@example.com").await.unwrap_err(),
            RepoError::NotFound
        );
        assert_eq!(repo.find_by_id(99).await.unwrap_err(), RepoError::NotFound);
    }

    #[tokio::test]
    async fn test_update_user_persists_and_bumps_updated_at() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        user.username = "alice_renamed".to_string();
        let updated = repo.update(&user).await.unwrap();

        assert_eq!(updated.username, "alice_renamed");
        assert!(updated.updated_at >= user.created_at);

        let fetched = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(fetched.username, "alice_renamed");
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice", "alice@example.com")).await.unwrap();
        let mut bob = repo.create(new_user("bob", "bob@example.com")).await.unwrap();

        bob.email = "alice@example.com".to_string();
        assert_eq!(repo.update(&bob).await.unwrap_err(), RepoError::AlreadyExists);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let ghost = User {
            id: 42,
            username: "ghost".to_string(),
            email: "ghost@example.com".to_string(),
            password_hash: "$2b$12$notarealhash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(repo.update(&ghost).await.unwrap_err(), RepoError::NotFound);
    }

    #[tokio::test]
    async fn test_create_task_defaults_to_not_completed() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(new_task("Buy milk", 1)).await.unwrap();

        assert_eq!(task.id, 1);
        assert!(!task.completed);
        assert_eq!(task.content, "");
    }

    #[tokio::test]
    async fn test_find_by_user_filters_and_orders() {
        let repo = InMemoryTaskRepository::new();
        repo.create(new_task("a", 1)).await.unwrap();
        repo.create(new_task("b", 2)).await.unwrap();
        repo.create(new_task("c", 1)).await.unwrap();

        let owned = repo.find_by_user(1).await.unwrap();
        let titles: Vec<&str> = owned.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(owned.windows(2).all(|w| w[0].id < w[1].id));

        assert!(repo.find_by_user(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_task_persists_changes() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.create(new_task("Buy milk", 1)).await.unwrap();

        task.completed = true;
        task.title = "Buy oat milk".to_string();
        let updated = repo.update(&task).await.unwrap();

        assert!(updated.completed);
        let fetched = repo.find_by_id(task.id).await.unwrap();
        assert_eq!(fetched.title, "Buy oat milk");
        assert!(fetched.completed);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(new_task("Buy milk", 1)).await.unwrap();

        repo.delete(task.id).await.unwrap();
        assert_eq!(repo.find_by_id(task.id).await.unwrap_err(), RepoError::NotFound);
        assert_eq!(repo.delete(task.id).await.unwrap_err(), RepoError::NotFound);
    }
}

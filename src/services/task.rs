use std::sync::Arc;

use crate::error::AppError;
use crate::models::task::{NewTask, Task};
use crate::repository::{RepoError, TaskRepository};

/// Task workflows, all scoped to the requesting user.
///
/// [`TaskService::get`] is the single ownership gate: update and delete
/// fetch through it first, so a task that exists but belongs to someone
/// else always reads as `Forbidden` and a missing one as `NotFound`, no
/// matter which operation was attempted.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn create(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Task, AppError> {
        validate_title(title)?;
        let new_task = NewTask {
            title: title.to_string(),
            content: content.to_string(),
            user_id,
        };
        self.tasks
            .create(new_task)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Fetches a task the caller owns.
    ///
    /// Distinguishes "not yours" from "not there": an existing task owned by
    /// another user is `Forbidden`, a missing id is `NotFound`.
    pub async fn get(&self, task_id: i32, user_id: i32) -> Result<Task, AppError> {
        let task = match self.tasks.find_by_id(task_id).await {
            Ok(task) => task,
            Err(RepoError::NotFound) => {
                return Err(AppError::NotFound("task not found".into()));
            }
            Err(e) => return Err(AppError::Internal(e.to_string())),
        };

        if task.user_id != user_id {
            return Err(AppError::Forbidden(
                "access to the requested task is denied".into(),
            ));
        }
        Ok(task)
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<Task>, AppError> {
        self.tasks
            .find_by_user(user_id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Applies a partial update to a task the caller owns. Absent fields
    /// keep their stored values, so an empty update is a no-op.
    pub async fn update(
        &self,
        task_id: i32,
        user_id: i32,
        title: Option<String>,
        content: Option<String>,
        completed: Option<bool>,
    ) -> Result<Task, AppError> {
        let mut task = self.get(task_id, user_id).await?;

        if let Some(title) = title {
            validate_title(&title)?;
            task.title = title;
        }
        if let Some(content) = content {
            task.content = content;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }

        match self.tasks.update(&task).await {
            Ok(task) => Ok(task),
            Err(RepoError::NotFound) => Err(AppError::NotFound("task not found".into())),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }

    /// Deletes a task the caller owns.
    pub async fn delete(&self, task_id: i32, user_id: i32) -> Result<(), AppError> {
        self.get(task_id, user_id).await?;

        match self.tasks.delete(task_id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(AppError::NotFound("task not found".into())),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }
}

/// Titles are 1 to 100 characters. Enforced here as well as in the request
/// DTOs, so the rule holds no matter which caller reaches the service.
fn validate_title(title: &str) -> Result<(), AppError> {
    let length = title.chars().count();
    if length == 0 || length > 100 {
        return Err(AppError::Validation(
            "title must be between 1 and 100 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryTaskRepository;

    const ALICE: i32 = 1;
    const BOB: i32 = 2;

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskRepository::new()))
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let tasks = service();
        let created = tasks.create(ALICE, "buy milk", "").await.unwrap();

        let fetched = tasks.get(created.id, ALICE).await.unwrap();
        assert_eq!(fetched.title, "buy milk");
        assert!(!fetched.completed);

        let listed = tasks.list_by_user(ALICE).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_title_length_is_enforced() {
        let tasks = service();

        let err = tasks.create(ALICE, "", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let long_title = "x".repeat(101);
        let err = tasks.create(ALICE, &long_title, "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let task = tasks.create(ALICE, "ok", "").await.unwrap();
        let err = tasks
            .update(task.id, ALICE, Some(long_title), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_distinguishes_forbidden_from_not_found() {
        let tasks = service();
        let created = tasks.create(ALICE, "buy milk", "").await.unwrap();

        let err = tasks.get(created.id, BOB).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = tasks.get(999, BOB).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_pass_through_the_ownership_gate() {
        let tasks = service();
        let created = tasks.create(ALICE, "buy milk", "").await.unwrap();

        let err = tasks
            .update(created.id, BOB, Some("hijacked".to_string()), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = tasks.delete(created.id, BOB).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // The owner still sees the task untouched.
        let fetched = tasks.get(created.id, ALICE).await.unwrap();
        assert_eq!(fetched.title, "buy milk");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_absent_fields() {
        let tasks = service();
        let created = tasks.create(ALICE, "buy milk", "two liters").await.unwrap();

        let updated = tasks
            .update(created.id, ALICE, None, None, Some(true))
            .await
            .unwrap();
        assert_eq!(updated.title, "buy milk");
        assert_eq!(updated.content, "two liters");
        assert!(updated.completed);

        // An update with no fields changes nothing.
        let unchanged = tasks
            .update(created.id, ALICE, None, None, None)
            .await
            .unwrap();
        assert_eq!(unchanged.title, "buy milk");
        assert_eq!(unchanged.content, "two liters");
        assert!(unchanged.completed);
    }

    #[tokio::test]
    async fn test_delete_removes_the_task() {
        let tasks = service();
        let created = tasks.create(ALICE, "buy milk", "").await.unwrap();

        tasks.delete(created.id, ALICE).await.unwrap();

        let err = tasks.get(created.id, ALICE).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(tasks.list_by_user(ALICE).await.unwrap().is_empty());
    }
}

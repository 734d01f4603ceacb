use crate::{
    auth::extractors::AuthenticatedUser,
    error::AppError,
    models::task::{CreateTaskRequest, UpdateTaskRequest},
    services::task::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists the authenticated user's tasks.
///
/// Always returns every task the caller owns and nothing else, ordered by
/// id ascending.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid access token.
#[get("")]
pub async fn list_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let owned = tasks.list_by_user(user.user_id()).await?;
    Ok(HttpResponse::Ok().json(owned))
}

/// Creates a new task for the authenticated user.
///
/// The task's owner is always the caller; the body cannot assign it to
/// anyone else.
///
/// ## Request Body:
/// A JSON object matching `CreateTaskRequest`:
/// - `title`: Between 1 and 100 characters (required).
/// - `content` (optional): Free-form text, defaults to empty.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If validation on the body fails.
/// - `401 Unauthorized`: If the request lacks a valid access token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks
        .create(user.user_id(), &task_data.title, &task_data.content)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid access token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(task_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task the caller owns.
///
/// ## Request Body:
/// A JSON object matching `UpdateTaskRequest`; every field is optional and
/// absent fields keep their stored values.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If validation on the body fails.
/// - `401 Unauthorized`: If the request lacks a valid access token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task_data = task_data.into_inner();
    let task = tasks
        .update(
            task_id.into_inner(),
            user.user_id(),
            task_data.title,
            task_data.content,
            task_data.completed,
        )
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the caller owns.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid access token.
/// - `403 Forbidden`: If the task exists but belongs to another user.
/// - `404 Not Found`: If no task with the given ID exists.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    tasks.delete(task_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

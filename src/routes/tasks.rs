use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskPatch},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// The single ownership check shared by update and delete: only the task's
/// owner may mutate it, and a mismatch is `Forbidden`, never silently a 404.
fn ensure_owner(caller: Uuid, task: &Task) -> Result<(), AppError> {
    if task.user_id != caller {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Lists the caller's tasks, newest creation first.
///
/// ## Responses:
/// - `200 OK`: JSON array of the caller's `Task` objects.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_tasks(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.find_all_by_owner(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// `text` is required and must be non-blank; `priority` defaults to Medium
/// when omitted, and an unknown priority value is a 400. Owner and creation
/// time are server-assigned.
///
/// ## Responses:
/// - `201 Created`: the created `Task`.
/// - `400 Bad Request`: blank text or invalid priority.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    payload: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = store.create(Task::new(payload.into_inner(), user.0)).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Partially updates a task; omitted fields retain their prior value.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: patch sets text to a blank string.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with this id.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    payload: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    let patch = payload.into_inner();
    if matches!(&patch.text, Some(text) if text.trim().is_empty()) {
        return Err(AppError::BadRequest("Task text cannot be empty".into()));
    }

    let id = task_id.into_inner();
    let task = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    ensure_owner(user.0, &task)?;

    // The store re-checks ownership in the same statement as the write;
    // a None here means the task vanished between lookup and update.
    match store.update(id, user.0, patch).await? {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task removed"}`.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    let task = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    ensure_owner(user.0, &task)?;

    if store.delete(id, user.0).await? {
        Ok(HttpResponse::Ok().json(json!({ "message": "Task removed" })))
    } else {
        Err(AppError::NotFound("Task not found".into()))
    }
}

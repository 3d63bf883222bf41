use crate::{
    error::AppError,
    models::{TaskInput, TaskUpdate},
    tasks::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves all tasks.
#[get("")]
pub async fn list_tasks(tasks: web::Data<TaskService>) -> Result<impl Responder, AppError> {
    let all = tasks.list().await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Creates a new task.
///
/// Expects `{title, description?, due_date?}`; the created task always
/// starts in the pending state and is returned with its assigned id.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    payload: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = tasks.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(&id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Applies a partial update to a task.
///
/// Only fields carrying a non-empty value overwrite the stored record;
/// absent or empty fields are left alone, so this cannot clear a field.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    id: web::Path<String>,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = tasks.update(&id.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    tasks.delete(&id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

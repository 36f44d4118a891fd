use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::models::{Task, TaskStatus};
use crate::error::{AppError, DatabaseError};
use crate::AppState;

const MAX_PAGE_SIZE: i64 = 100;
const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<TaskStatus>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
    pub tasks: Vec<Task>,
}

pub async fn create_task(
    user: AuthUser,
    req: web::Json<CreateTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::ValidationError("Title must not be empty".into()));
    }

    let task = Task::new(
        user.user_id,
        req.title.clone(),
        req.description.clone(),
        req.status.unwrap_or(TaskStatus::Pending),
    );
    let task = state.db.create_task(&task).await?;

    Ok(HttpResponse::Created().json(task))
}

pub async fn list_tasks(
    user: AuthUser,
    query: web::Query<ListTasksQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;
    let status = query.status.map(|s| s.as_str());

    let total = state
        .db
        .count_tasks(user.user_id, status, query.q.as_deref())
        .await?;
    let tasks = state
        .db
        .list_tasks(user.user_id, status, query.q.as_deref(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(TaskListResponse {
        total,
        page,
        limit,
        pages: (total + limit - 1) / limit,
        tasks,
    }))
}

pub async fn get_task(
    user: AuthUser,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task = owned_task(&state, path.into_inner(), user.user_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task(
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut task = owned_task(&state, path.into_inner(), user.user_id).await?;

    if let Some(title) = &req.title {
        task.title = title.clone();
    }
    if let Some(description) = &req.description {
        task.description = Some(description.clone());
    }
    if let Some(status) = req.status {
        task.status = status.as_str().to_string();
    }
    task.updated_at = Utc::now();

    let task = state.db.update_task(&task).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn toggle_task(
    user: AuthUser,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut task = owned_task(&state, path.into_inner(), user.user_id).await?;

    task.status = if task.status == TaskStatus::Done.as_str() {
        TaskStatus::Pending.as_str().to_string()
    } else {
        TaskStatus::Done.as_str().to_string()
    };
    task.updated_at = Utc::now();

    let task = state.db.update_task(&task).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task(
    user: AuthUser,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task = owned_task(&state, path.into_inner(), user.user_id).await?;
    state.db.delete_task(task.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

// Another user's task is indistinguishable from a missing one
async fn owned_task(state: &AppState, id: Uuid, user_id: Uuid) -> Result<Task, AppError> {
    match state.db.get_task(id).await? {
        Some(task) if task.user_id == user_id => Ok(task),
        _ => Err(DatabaseError::NotFound.into()),
    }
}

// src/handlers/comercial.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::onboarding::CompleteTaskPayload,
    middleware::auth::AuthenticatedUser,
    models::comercial::{ComercialTask, ComercialTracking},
    services::OperationContext,
    services::comercial_service::ComercialOutcome,
};

// POST /api/comercial/tasks/{id}/complete
#[utoipa::path(
    post,
    path = "/api/comercial/tasks/{id}/complete",
    tag = "Comercial",
    params(("id" = Uuid, Path, description = "ID da tarefa comercial")),
    request_body = CompleteTaskPayload,
    responses(
        (status = 200, description = "Resultado do avanço comercial", body = ComercialOutcome),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(task_id): Path<Uuid>,
    payload: Option<Json<CompleteTaskPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let task = app_state
        .comercial_service
        .find_task(&app_state.db_pool, task_id)
        .await?
        .ok_or(AppError::TaskNotFound)?;

    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, task.client_id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    let ctx = OperationContext::with_target_manager(user.id, payload.target_manager);

    let outcome = app_state
        .comercial_service
        .complete_task(
            &app_state.db_pool,
            &ctx,
            task.id,
            task.task_type,
            client.id,
            &client.name,
        )
        .await?;

    Ok((StatusCode::OK, Json(outcome)))
}

// GET /api/clients/{id}/comercial-tasks
#[utoipa::path(
    get,
    path = "/api/clients/{id}/comercial-tasks",
    tag = "Comercial",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Tarefas comerciais do cliente", body = Vec<ComercialTask>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.comercial_service.list_tasks(client_id).await?;

    Ok((StatusCode::OK, Json(tasks)))
}

// GET /api/clients/{id}/comercial-tracking
#[utoipa::path(
    get,
    path = "/api/clients/{id}/comercial-tracking",
    tag = "Comercial",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Acompanhamento comercial", body = ComercialTracking),
        (status = 404, description = "Cliente ainda sem acompanhamento comercial")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tracking(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tracking = app_state
        .comercial_service
        .get_tracking(client_id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::OK, Json(tracking)))
}

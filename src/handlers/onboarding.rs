// src/handlers/onboarding.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::onboarding::{ClientOnboarding, DailyTracking, OnboardingTask},
    services::OperationContext,
    services::onboarding_service::AdvanceOutcome,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskPayload {
    // Conclusão "em nome de" um gestor específico (opcional).
    pub target_manager: Option<Uuid>,
}

// POST /api/onboarding/tasks/{id}/complete
//
// O handler resolve a tarefa (tipo + cliente) e entrega contexto explícito
// ao motor; o motor nunca enxerga estado ambiente.
#[utoipa::path(
    post,
    path = "/api/onboarding/tasks/{id}/complete",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = CompleteTaskPayload,
    responses(
        (status = 200, description = "Resultado do avanço", body = AdvanceOutcome),
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
        .onboarding_service
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
        .onboarding_service
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

// GET /api/clients/{id}/onboarding
#[utoipa::path(
    get,
    path = "/api/clients/{id}/onboarding",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Registro de onboarding", body = ClientOnboarding),
        (status = 404, description = "Cliente ainda sem onboarding")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_onboarding(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let onboarding = app_state
        .onboarding_service
        .get_onboarding(&app_state.db_pool, client_id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::OK, Json(onboarding)))
}

// GET /api/clients/{id}/tasks
#[utoipa::path(
    get,
    path = "/api/clients/{id}/tasks",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Tarefas do cliente", body = Vec<OnboardingTask>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.onboarding_service.list_tasks(client_id).await?;

    Ok((StatusCode::OK, Json(tasks)))
}

// GET /api/clients/{id}/tracking
//
// Posição do cliente no quadro de acompanhamento diário (só existe para
// clientes que já concluíram o onboarding).
#[utoipa::path(
    get,
    path = "/api/clients/{id}/tracking",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Acompanhamento diário", body = DailyTracking),
        (status = 404, description = "Cliente ainda sem acompanhamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tracking(
    State(app_state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tracking = app_state
        .onboarding_service
        .get_tracking(client_id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::OK, Json(tracking)))
}

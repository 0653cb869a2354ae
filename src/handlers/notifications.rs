// src/handlers/notifications.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::notification::{DelayJustification, JustifyPayload, Notification},
    services::delay_service::ScanReport,
};

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notificações",
    responses(
        (status = 200, description = "Notificações do usuário", body = Vec<Notification>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state.delay_service.list_notifications(user.id).await?;

    Ok((StatusCode::OK, Json(notifications)))
}

// POST /api/notifications/{id}/justify
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/justify",
    tag = "Notificações",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    request_body = JustifyPayload,
    responses(
        (status = 201, description = "Justificativa registrada", body = DelayJustification),
        (status = 404, description = "Notificação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn justify(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(notification_id): Path<Uuid>,
    Json(payload): Json<JustifyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let justification = app_state
        .delay_service
        .justify(
            &app_state.db_pool,
            &user,
            notification_id,
            &payload.justification,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(justification)))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListJustificationsQuery {
    #[serde(default)]
    pub include_archived: bool,
}

// GET /api/justifications
#[utoipa::path(
    get,
    path = "/api/justifications",
    tag = "Notificações",
    params(ListJustificationsQuery),
    responses(
        (status = 200, description = "Justificativas", body = Vec<DelayJustification>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_justifications(
    State(app_state): State<AppState>,
    Query(query): Query<ListJustificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .delay_service
        .list_justifications(query.include_archived)
        .await?;

    Ok((StatusCode::OK, Json(rows)))
}

// POST /api/justifications/{id}/archive
#[utoipa::path(
    post,
    path = "/api/justifications/{id}/archive",
    tag = "Notificações",
    params(("id" = Uuid, Path, description = "ID da justificativa")),
    responses(
        (status = 204, description = "Justificativa arquivada"),
        (status = 403, description = "Apenas admins podem arquivar")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_justification(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(justification_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .delay_service
        .archive_justification(&app_state.db_pool, &user, justification_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/delays/scan
//
// Disparo manual da varredura; a periódica roda num task do tokio.
#[utoipa::path(
    post,
    path = "/api/delays/scan",
    tag = "Notificações",
    responses(
        (status = 200, description = "Relatório da varredura", body = ScanReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn scan_delays(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.delay_service.scan(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(report)))
}

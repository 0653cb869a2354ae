// src/handlers/kanban.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::kanban::{CreateCardPayload, KanbanBoard, KanbanCard, MoveCardPayload},
    services::OperationContext,
    services::kanban_service::MoveOutcome,
};

// POST /api/kanban/cards
#[utoipa::path(
    post,
    path = "/api/kanban/cards",
    tag = "Kanban",
    request_body = CreateCardPayload,
    responses(
        (status = 201, description = "Cartão criado", body = KanbanCard)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_card(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ctx = OperationContext::new(user.id);
    let card = app_state.kanban_service.create_card(&ctx, &payload).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

// GET /api/kanban/{board}
#[utoipa::path(
    get,
    path = "/api/kanban/{board}",
    tag = "Kanban",
    params(("board" = KanbanBoard, Path, description = "Quadro do departamento")),
    responses(
        (status = 200, description = "Cartões do quadro", body = Vec<KanbanCard>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_board(
    State(app_state): State<AppState>,
    Path(board): Path<KanbanBoard>,
) -> Result<impl IntoResponse, AppError> {
    let cards = app_state.kanban_service.list_board(board).await?;

    Ok((StatusCode::OK, Json(cards)))
}

// POST /api/kanban/cards/{id}/move
#[utoipa::path(
    post,
    path = "/api/kanban/cards/{id}/move",
    tag = "Kanban",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    request_body = MoveCardPayload,
    responses(
        (status = 200, description = "Resultado do movimento", body = MoveOutcome),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn move_card(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(card_id): Path<Uuid>,
    Json(payload): Json<MoveCardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ctx = OperationContext::new(user.id);
    let outcome = app_state
        .kanban_service
        .move_card(&app_state.db_pool, &ctx, card_id, &payload.status)
        .await?;

    Ok((StatusCode::OK, Json(outcome)))
}

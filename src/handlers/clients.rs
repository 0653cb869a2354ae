// src/handlers/clients.rs

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
    models::client::{Client, CreateClientPayload},
};

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente registrado", body = Client)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state.client_repo.create_client(&payload).await?;

    tracing::info!("✅ Cliente '{}' registrado", client.name);

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_repo.list_clients().await?;

    Ok((StatusCode::OK, Json(clients)))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::OK, Json(client)))
}

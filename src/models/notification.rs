// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_type")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sqlx(rename = "novo_cliente_24h")]
    #[serde(rename = "novo_cliente_24h")]
    NovoCliente24h,
    #[sqlx(rename = "onboarding_5d")]
    #[serde(rename = "onboarding_5d")]
    Onboarding5d,
    #[sqlx(rename = "acompanhamento")]
    Acompanhamento,
    #[sqlx(rename = "conclusao_tarefa")]
    ConclusaoTarefa,
}

// Registro efêmero de um estouro de SLA (ou aviso de conclusão de cartão).
// Notificações de atraso são deduplicadas por (usuário, tipo, cliente)
// e apagadas quando uma justificativa é registrada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub client_id: Option<Uuid>,
    pub card_id: Option<Uuid>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// Registro permanente explicando o estouro; pode ser arquivado
// (soft-delete) por um admin, nunca apagado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DelayJustification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub client_id: Option<Uuid>,
    pub justification: String,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JustifyPayload {
    #[validate(length(min = 5, message = "A justificativa deve ter no mínimo 5 caracteres."))]
    pub justification: String,
}

// src/models/kanban.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Quadros por departamento. Cada quadro tem um status terminal próprio:
// a entrada de um cartão nesse status dispara o aviso de conclusão
// para quem abriu o cartão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "kanban_board", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum KanbanBoard {
    Design,
    Dev,
    Video,
    Producao,
    Ads,
}

impl KanbanBoard {
    pub fn terminal_status(self) -> &'static str {
        match self {
            KanbanBoard::Design | KanbanBoard::Dev | KanbanBoard::Ads => "aguardando_aprovacao",
            KanbanBoard::Producao => "para_aprovacao",
            KanbanBoard::Video => "gravado",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub id: Uuid,
    pub board: KanbanBoard,
    pub client_id: Option<Uuid>,

    pub title: String,
    // Coluna atual do cartão. Texto livre: as colunas variam por quadro
    // e são configuradas no front.
    pub status: String,

    pub created_by: Uuid,
    pub assigned_to: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardPayload {
    pub board: KanbanBoard,
    pub client_id: Option<Uuid>,
    #[validate(length(min = 2, message = "O título deve ter no mínimo 2 caracteres."))]
    pub title: String,
    #[validate(length(min = 1, message = "required"))]
    pub status: String,
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardPayload {
    #[validate(length(min = 1, message = "required"))]
    pub status: String,
}

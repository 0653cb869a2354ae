// src/models/comercial.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::onboarding::{DiaSemana, TaskStatus};

// O lado comercial tem só duas tarefas fixas; sem numeração de marco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "comercial_task_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComercialTaskType {
    AgendarConsultoria,
    RealizarConsultoria,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComercialTask {
    pub id: Uuid,
    pub client_id: Uuid,

    pub task_type: ComercialTaskType,
    pub title: String,
    pub status: TaskStatus,

    pub assigned_to: Option<Uuid>,
    pub due_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

// Acompanhamento comercial em regime, um por par (cliente, consultor).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComercialTracking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub current_day: DiaSemana,
    pub created_at: DateTime<Utc>,
}

// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Ciclo de vida operacional do cliente. Cliente nunca é apagado
// fisicamente; sai do funil como 'churned' ou 'arquivado'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "client_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    NovoCliente,
    Onboarding,
    Ativo,
    Churned,
    Arquivado,
}

// Trilha comercial (vendas). Avança de forma INDEPENDENTE do status
// operacional acima; os dois nunca devem ser misturados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "comercial_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComercialStatus {
    Novo,
    ConsultoriaMarcada,
    ConsultoriaRealizada,
    EmAcompanhamento,
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    pub name: String,
    pub corporate_name: Option<String>,
    pub cnpj: Option<String>,

    pub status: ClientStatus,
    pub comercial_status: ComercialStatus,

    // Atribuições
    pub traffic_manager_id: Option<Uuid>,
    pub consultant_id: Option<Uuid>,
    pub squad: Option<String>,

    // Carimbos do funil
    pub comercial_entered_at: DateTime<Utc>,
    pub comercial_onboarding_started_at: Option<DateTime<Utc>>,
    pub onboarding_started_at: Option<DateTime<Utc>>,
    pub campaign_published_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,
    pub corporate_name: Option<String>,
    pub cnpj: Option<String>,
    pub traffic_manager_id: Option<Uuid>,
    pub consultant_id: Option<Uuid>,
    pub squad: Option<String>,
}

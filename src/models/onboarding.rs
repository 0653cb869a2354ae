// src/models/onboarding.rs

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Posição fina do cliente dentro de um marco. Um valor por tarefa
// que avança o cliente (tarefas auxiliares não têm etapa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "onboarding_step")]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[sqlx(rename = "call_1_marcada")]
    #[serde(rename = "call_1_marcada")]
    Call1Marcada,
    #[sqlx(rename = "call_1_realizada")]
    #[serde(rename = "call_1_realizada")]
    Call1Realizada,
    #[sqlx(rename = "formulario_enviado")]
    FormularioEnviado,
    #[sqlx(rename = "formulario_recebido")]
    FormularioRecebido,
    #[sqlx(rename = "call_2_marcada")]
    #[serde(rename = "call_2_marcada")]
    Call2Marcada,
    #[sqlx(rename = "call_2_realizada")]
    #[serde(rename = "call_2_realizada")]
    Call2Realizada,
    #[sqlx(rename = "criativos_brifados")]
    CriativosBrifados,
    #[sqlx(rename = "criativos_aprovados")]
    CriativosAprovados,
    #[sqlx(rename = "campanha_configurada")]
    CampanhaConfigurada,
    #[sqlx(rename = "campanha_publicada")]
    CampanhaPublicada,
}

// Todos os tipos de tarefa de onboarding, avançadoras E auxiliares.
// A distinção fica na tabela de definições (services::definitions):
// tipo sem definição de avanço é auxiliar e não move o cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "onboarding_task_type")]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[sqlx(rename = "marcar_call_1")]
    #[serde(rename = "marcar_call_1")]
    MarcarCall1,
    #[sqlx(rename = "realizar_call_1")]
    #[serde(rename = "realizar_call_1")]
    RealizarCall1,
    #[sqlx(rename = "enviar_formulario")]
    EnviarFormulario,
    #[sqlx(rename = "cobrar_formulario")]
    CobrarFormulario,
    #[sqlx(rename = "marcar_call_2")]
    #[serde(rename = "marcar_call_2")]
    MarcarCall2,
    #[sqlx(rename = "realizar_call_2")]
    #[serde(rename = "realizar_call_2")]
    RealizarCall2,
    #[sqlx(rename = "brifar_criativos")]
    BrifarCriativos,
    #[sqlx(rename = "anexar_link_consultoria")]
    AnexarLinkConsultoria,
    #[sqlx(rename = "certificar_consultoria")]
    CertificarConsultoria,
    #[sqlx(rename = "enviar_link_drive")]
    EnviarLinkDrive,
    #[sqlx(rename = "aprovar_criativos")]
    AprovarCriativos,
    #[sqlx(rename = "configurar_campanha")]
    ConfigurarCampanha,
    #[sqlx(rename = "publicar_campanha")]
    PublicarCampanha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pendente,
    Concluida,
}

// Dia da semana do quadro de acompanhamento. Os valores são os
// identificadores usados pelas colunas do quadro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "week_day", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiaSemana {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
    Domingo,
}

impl DiaSemana {
    // Nome exibido nos toasts ("cliente entrou no quadro de segunda-feira").
    pub fn display_name(self) -> &'static str {
        match self {
            DiaSemana::Segunda => "segunda-feira",
            DiaSemana::Terca => "terça-feira",
            DiaSemana::Quarta => "quarta-feira",
            DiaSemana::Quinta => "quinta-feira",
            DiaSemana::Sexta => "sexta-feira",
            DiaSemana::Sabado => "sábado",
            DiaSemana::Domingo => "domingo",
        }
    }
}

impl From<Weekday> for DiaSemana {
    fn from(dia: Weekday) -> Self {
        match dia {
            Weekday::Mon => DiaSemana::Segunda,
            Weekday::Tue => DiaSemana::Terca,
            Weekday::Wed => DiaSemana::Quarta,
            Weekday::Thu => DiaSemana::Quinta,
            Weekday::Fri => DiaSemana::Sexta,
            Weekday::Sat => DiaSemana::Sabado,
            Weekday::Sun => DiaSemana::Domingo,
        }
    }
}

// --- REGISTROS ---

// 1:1 com o cliente. current_milestone é monotônico (1–6);
// completed_at é gravado uma única vez, na tarefa terminal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientOnboarding {
    pub id: Uuid,
    pub client_id: Uuid,

    pub current_milestone: i32,
    pub current_step: Option<OnboardingStep>,

    // O marco 1 começa em created_at.
    pub milestone_2_started_at: Option<DateTime<Utc>>,
    pub milestone_3_started_at: Option<DateTime<Utc>>,
    pub milestone_4_started_at: Option<DateTime<Utc>>,
    pub milestone_5_started_at: Option<DateTime<Utc>>,
    pub milestone_6_started_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTask {
    pub id: Uuid,
    pub client_id: Uuid,

    pub task_type: TaskType,
    pub title: String,
    pub description: String,

    pub status: TaskStatus,
    pub archived: bool,
    pub milestone: i32,

    pub assigned_to: Option<Uuid>,
    pub due_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

// Colocação do cliente ativo no quadro de dia da semana.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTracking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub current_day: DiaSemana,
    pub last_moved_at: DateTime<Utc>,
    pub is_delayed: bool,
    pub traffic_manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

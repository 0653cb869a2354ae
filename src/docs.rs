// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,

        // --- Onboarding ---
        handlers::onboarding::complete_task,
        handlers::onboarding::get_onboarding,
        handlers::onboarding::list_tasks,
        handlers::onboarding::get_tracking,

        // --- Comercial ---
        handlers::comercial::complete_task,
        handlers::comercial::list_tasks,
        handlers::comercial::get_tracking,

        // --- Kanban ---
        handlers::kanban::create_card,
        handlers::kanban::list_board,
        handlers::kanban::move_card,

        // --- Notificações ---
        handlers::notifications::list_notifications,
        handlers::notifications::justify,
        handlers::notifications::list_justifications,
        handlers::notifications::archive_justification,
        handlers::notifications::scan_delays,
    ),
    components(
        schemas(
            models::auth::User,
            models::auth::UserRole,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::client::Client,
            models::client::ClientStatus,
            models::client::ComercialStatus,
            models::client::CreateClientPayload,
            models::onboarding::ClientOnboarding,
            models::onboarding::OnboardingStep,
            models::onboarding::OnboardingTask,
            models::onboarding::TaskType,
            models::onboarding::TaskStatus,
            models::onboarding::DiaSemana,
            models::onboarding::DailyTracking,
            models::comercial::ComercialTask,
            models::comercial::ComercialTaskType,
            models::comercial::ComercialTracking,
            models::notification::Notification,
            models::notification::NotificationType,
            models::notification::DelayJustification,
            models::notification::JustifyPayload,
            models::kanban::KanbanCard,
            models::kanban::KanbanBoard,
            models::kanban::CreateCardPayload,
            models::kanban::MoveCardPayload,
            services::onboarding_service::AdvanceOutcome,
            services::comercial_service::ComercialOutcome,
            services::kanban_service::MoveOutcome,
            services::delay_service::ScanReport,
            handlers::onboarding::CompleteTaskPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Onboarding", description = "Motor de avanço do onboarding"),
        (name = "Comercial", description = "Motor de avanço comercial"),
        (name = "Kanban", description = "Quadros por departamento"),
        (name = "Notificações", description = "Atrasos e justificativas"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

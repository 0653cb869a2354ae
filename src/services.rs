pub mod auth;
pub use auth::AuthService;
pub mod definitions;
pub mod onboarding_service;
pub use onboarding_service::OnboardingService;
pub mod comercial_service;
pub use comercial_service::ComercialService;
pub mod delay_service;
pub use delay_service::DelayService;
pub mod kanban_service;
pub use kanban_service::KanbanService;

use uuid::Uuid;

// Contexto explícito de quem dispara a operação. Nada de estado ambiente:
// todo motor recebe isto por parâmetro, o que mantém a máquina de estados
// pura e testável.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext {
    pub user_id: Uuid,
    // Gestor alvo opcional (a UI permite concluir "em nome de" um gestor).
    pub target_manager: Option<Uuid>,
}

impl OperationContext {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            target_manager: None,
        }
    }

    pub fn with_target_manager(user_id: Uuid, target_manager: Option<Uuid>) -> Self {
        Self {
            user_id,
            target_manager,
        }
    }
}

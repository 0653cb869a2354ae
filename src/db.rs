pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod onboarding_repo;
pub use onboarding_repo::OnboardingRepository;
pub mod comercial_repo;
pub use comercial_repo::ComercialRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod kanban_repo;
pub use kanban_repo::KanbanRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

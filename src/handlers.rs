pub mod auth;
pub mod clients;
pub mod comercial;
pub mod kanban;
pub mod notifications;
pub mod onboarding;

pub mod auth;
pub mod client;
pub mod comercial;
pub mod kanban;
pub mod notification;
pub mod onboarding;

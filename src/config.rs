// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::calendar::Calendar,
    db::{
        ClientRepository, ComercialRepository, KanbanRepository, NotificationRepository,
        OnboardingRepository, UserRepository,
    },
    services::{AuthService, ComercialService, DelayService, KanbanService, OnboardingService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub auth_service: AuthService,
    pub client_repo: ClientRepository,
    pub onboarding_service: OnboardingService,
    pub comercial_service: ComercialService,
    pub delay_service: DelayService,
    pub kanban_service: KanbanService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Fuso do negócio (padrão America/Sao_Paulo, -03:00), configurável
        // via BUSINESS_TZ_OFFSET.
        let calendar = Calendar::from_env()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let onboarding_repo = OnboardingRepository::new(db_pool.clone());
        let comercial_repo = ComercialRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let kanban_repo = KanbanRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret, db_pool.clone());
        let onboarding_service =
            OnboardingService::new(onboarding_repo, client_repo.clone(), calendar);
        let comercial_service =
            ComercialService::new(comercial_repo, client_repo.clone(), calendar);
        let delay_service =
            DelayService::new(notification_repo.clone(), client_repo.clone(), calendar);
        let kanban_service = KanbanService::new(kanban_repo, notification_repo);

        Ok(Self {
            db_pool,
            auth_service,
            client_repo,
            onboarding_service,
            comercial_service,
            delay_service,
            kanban_service,
        })
    }
}

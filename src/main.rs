//src/main.rs

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Intervalo da varredura de atrasos em segundos.
const DELAY_SCAN_INTERVAL_SECS: u64 = 300;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Varredura periódica de atrasos (novo_cliente_24h / onboarding_5d).
    // O primeiro tick dispara imediatamente, então o estado fica correto
    // logo após o boot, mesmo depois de um downtime longo.
    {
        let state = app_state.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(DELAY_SCAN_INTERVAL_SECS));
            loop {
                interval.tick().await;
                if let Err(e) = state.delay_service.scan(&state.db_pool).await {
                    tracing::error!("Falha na varredura de atrasos: {}", e);
                }
            }
        });
    }

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route("/{id}", get(handlers::clients::get_client))
        .route("/{id}/onboarding", get(handlers::onboarding::get_onboarding))
        .route("/{id}/tasks", get(handlers::onboarding::list_tasks))
        .route("/{id}/tracking", get(handlers::onboarding::get_tracking))
        .route(
            "/{id}/comercial-tasks",
            get(handlers::comercial::list_tasks),
        )
        .route(
            "/{id}/comercial-tracking",
            get(handlers::comercial::get_tracking),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let onboarding_routes = Router::new()
        .route(
            "/tasks/{id}/complete",
            post(handlers::onboarding::complete_task),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let comercial_routes = Router::new()
        .route(
            "/tasks/{id}/complete",
            post(handlers::comercial::complete_task),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let kanban_routes = Router::new()
        .route("/cards", post(handlers::kanban::create_card))
        .route("/cards/{id}/move", post(handlers::kanban::move_card))
        .route("/{board}", get(handlers::kanban::list_board))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route(
            "/{id}/justify",
            post(handlers::notifications::justify),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let justification_routes = Router::new()
        .route("/", get(handlers::notifications::list_justifications))
        .route(
            "/{id}/archive",
            post(handlers::notifications::archive_justification),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let delay_routes = Router::new()
        .route("/scan", post(handlers::notifications::scan_delays))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/onboarding", onboarding_routes)
        .nest("/api/comercial", comercial_routes)
        .nest("/api/kanban", kanban_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/justifications", justification_routes)
        .nest("/api/delays", delay_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

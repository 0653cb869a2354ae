// src/db/client_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, ClientStatus, ComercialStatus, CreateClientPayload},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_client(&self, payload: &CreateClientPayload) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                name, corporate_name, cnpj, traffic_manager_id, consultant_id, squad
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.corporate_name)
        .bind(&payload.cnpj)
        .bind(payload.traffic_manager_id)
        .bind(payload.consultant_id)
        .bind(&payload.squad)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(client)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }

    // novo_cliente -> onboarding, carimbando o início uma única vez.
    pub async fn promote_to_onboarding<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE clients
            SET status = $1,
                onboarding_started_at = COALESCE(onboarding_started_at, $2),
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(ClientStatus::Onboarding)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Tarefa terminal concluída: cliente vira ativo e a publicação é carimbada.
    pub async fn activate<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE clients
            SET status = $1,
                campaign_published_at = COALESCE(campaign_published_at, $2),
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(ClientStatus::Ativo)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn set_comercial_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ComercialStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE clients SET comercial_status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Consultoria marcada: além do status, carimba (uma vez) o início do
    // onboarding comercial, base do limiar de 5 dias.
    pub async fn mark_consultoria_marcada<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE clients
            SET comercial_status = $1,
                comercial_onboarding_started_at = COALESCE(comercial_onboarding_started_at, $2),
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(ComercialStatus::ConsultoriaMarcada)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Usada pela varredura de atrasos, fora de transação.
    pub async fn list_by_comercial_status(
        &self,
        statuses: &[ComercialStatus],
    ) -> Result<Vec<Client>, AppError> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE comercial_status = ANY($1)")
                .bind(statuses)
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }
}

// src/db/notification_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notification::{DelayJustification, Notification, NotificationType},
};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  NOTIFICAÇÕES
    // =========================================================================

    // Notificação de atraso, deduplicada por (usuário, tipo, cliente) via
    // índice único parcial. Varreduras repetidas caem no DO NOTHING.
    pub async fn insert_delay_if_absent<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        notification_type: NotificationType,
        client_id: Uuid,
        message: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, notification_type, client_id, message)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, notification_type, client_id)
                WHERE client_id IS NOT NULL
                DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(client_id)
        .bind(message)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    // Aviso de conclusão de cartão, endereçado a quem abriu o cartão.
    // client_id fica NULL de propósito: o índice de deduplicação só vale
    // para notificações de atraso.
    pub async fn insert_card_completed<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        card_id: Uuid,
        message: &str,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, notification_type, card_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(NotificationType::ConclusaoTarefa)
        .bind(card_id)
        .bind(message)
        .fetch_one(executor)
        .await?;

        Ok(notification)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Notification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(notification)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  JUSTIFICATIVAS
    // =========================================================================

    pub async fn insert_justification<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        notification_type: NotificationType,
        client_id: Option<Uuid>,
        justification: &str,
    ) -> Result<DelayJustification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, DelayJustification>(
            r#"
            INSERT INTO delay_justifications (user_id, notification_type, client_id, justification)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(client_id)
        .bind(justification)
        .fetch_one(executor)
        .await?;

        Ok(row)
    }

    pub async fn list_justifications(
        &self,
        include_archived: bool,
    ) -> Result<Vec<DelayJustification>, AppError> {
        let rows = sqlx::query_as::<_, DelayJustification>(
            r#"
            SELECT * FROM delay_justifications
            WHERE archived = FALSE OR $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // Soft-delete: justificativa é registro permanente, nunca é apagada.
    pub async fn archive_justification<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE delay_justifications SET archived = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

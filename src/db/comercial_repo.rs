// src/db/comercial_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::comercial::{ComercialTask, ComercialTaskType, ComercialTracking},
    models::onboarding::TaskStatus,
};

#[derive(Clone)]
pub struct ComercialRepository {
    pool: PgPool,
}

impl ComercialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_task_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<ComercialTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task =
            sqlx::query_as::<_, ComercialTask>("SELECT * FROM comercial_tasks WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(task)
    }

    pub async fn list_tasks(&self, client_id: Uuid) -> Result<Vec<ComercialTask>, AppError> {
        let tasks = sqlx::query_as::<_, ComercialTask>(
            "SELECT * FROM comercial_tasks WHERE client_id = $1 ORDER BY due_date ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn complete_task<'e, E>(
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
            UPDATE comercial_tasks
            SET status = $1, completed_at = COALESCE(completed_at, $2)
            WHERE id = $3
            "#,
        )
        .bind(TaskStatus::Concluida)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // UNIQUE (client_id, task_type): a segunda conclusão de
    // agendar_consultoria não duplica a tarefa de realizar.
    pub async fn insert_task_if_absent<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        task_type: ComercialTaskType,
        title: &str,
        assigned_to: Option<Uuid>,
        due_date: DateTime<Utc>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO comercial_tasks (client_id, task_type, title, assigned_to, due_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (client_id, task_type) DO NOTHING
            "#,
        )
        .bind(client_id)
        .bind(task_type)
        .bind(title)
        .bind(assigned_to)
        .bind(due_date)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    // Acompanhamento comercial, um por par (cliente, consultor), sempre
    // começando na segunda-feira.
    pub async fn insert_tracking_if_absent<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        consultant_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO comercial_tracking (client_id, consultant_id)
            VALUES ($1, $2)
            ON CONFLICT (client_id, consultant_id) DO NOTHING
            "#,
        )
        .bind(client_id)
        .bind(consultant_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn get_tracking(
        &self,
        client_id: Uuid,
    ) -> Result<Option<ComercialTracking>, AppError> {
        let tracking = sqlx::query_as::<_, ComercialTracking>(
            "SELECT * FROM comercial_tracking WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tracking)
    }
}

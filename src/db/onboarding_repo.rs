// src/db/onboarding_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::onboarding::{
        ClientOnboarding, DailyTracking, DiaSemana, OnboardingStep, OnboardingTask, TaskStatus,
        TaskType,
    },
};

#[derive(Clone)]
pub struct OnboardingRepository {
    pool: PgPool,
}

impl OnboardingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TAREFAS
    // =========================================================================

    pub async fn find_task_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<OnboardingTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task = sqlx::query_as::<_, OnboardingTask>(
            "SELECT * FROM onboarding_tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    pub async fn list_tasks(&self, client_id: Uuid) -> Result<Vec<OnboardingTask>, AppError> {
        let tasks = sqlx::query_as::<_, OnboardingTask>(
            r#"
            SELECT * FROM onboarding_tasks
            WHERE client_id = $1 AND NOT archived
            ORDER BY due_date ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    // Marca a tarefa como concluída. COALESCE preserva o primeiro carimbo
    // se a conclusão for repetida (retry do front).
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
            UPDATE onboarding_tasks
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

    // Inserção condicional: o índice único parcial (client_id, task_type)
    // WHERE NOT archived transforma a checagem de existência em garantia
    // real. Retorna true se a tarefa foi de fato criada.
    pub async fn insert_task_if_absent<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        task_type: TaskType,
        title: &str,
        description: &str,
        milestone: i32,
        assigned_to: Option<Uuid>,
        due_date: DateTime<Utc>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO onboarding_tasks (
                client_id, task_type, title, description, milestone, assigned_to, due_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (client_id, task_type) WHERE NOT archived DO NOTHING
            "#,
        )
        .bind(client_id)
        .bind(task_type)
        .bind(title)
        .bind(description)
        .bind(milestone)
        .bind(assigned_to)
        .bind(due_date)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    // =========================================================================
    //  ONBOARDING
    // =========================================================================

    pub async fn get_onboarding<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<Option<ClientOnboarding>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let onboarding = sqlx::query_as::<_, ClientOnboarding>(
            "SELECT * FROM client_onboarding WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_optional(executor)
        .await?;

        Ok(onboarding)
    }

    // Criação preguiçosa: primeiro avanço de um cliente sem registro
    // começa no marco 1.
    pub async fn create_onboarding<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<ClientOnboarding, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let onboarding = sqlx::query_as::<_, ClientOnboarding>(
            "INSERT INTO client_onboarding (client_id) VALUES ($1) RETURNING *",
        )
        .bind(client_id)
        .fetch_one(executor)
        .await?;

        Ok(onboarding)
    }

    // Aplica a transição de etapa/marco. GREATEST preserva a monotonicidade
    // do marco mesmo se uma tarefa antiga for reconcluída. O carimbo de
    // início de marco só é gravado quando o número realmente sobe.
    pub async fn advance<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        step: OnboardingStep,
        milestone: i32,
        started_milestone: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Coluna fixa por número de marco; nada vindo do usuário entra no SQL.
        let stamp_column = match started_milestone {
            Some(2) => Some("milestone_2_started_at"),
            Some(3) => Some("milestone_3_started_at"),
            Some(4) => Some("milestone_4_started_at"),
            Some(5) => Some("milestone_5_started_at"),
            Some(6) => Some("milestone_6_started_at"),
            _ => None,
        };

        match stamp_column {
            Some(column) => {
                let sql = format!(
                    r#"
                    UPDATE client_onboarding
                    SET current_step = $1,
                        current_milestone = GREATEST(current_milestone, $2),
                        {column} = COALESCE({column}, $3),
                        updated_at = NOW()
                    WHERE client_id = $4
                    "#
                );
                sqlx::query(&sql)
                    .bind(step)
                    .bind(milestone)
                    .bind(now)
                    .bind(client_id)
                    .execute(executor)
                    .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE client_onboarding
                    SET current_step = $1,
                        current_milestone = GREATEST(current_milestone, $2),
                        updated_at = NOW()
                    WHERE client_id = $3
                    "#,
                )
                .bind(step)
                .bind(milestone)
                .bind(client_id)
                .execute(executor)
                .await?;
            }
        }

        Ok(())
    }

    // completed_at é gravado exatamente uma vez.
    pub async fn complete_onboarding<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE client_onboarding
            SET completed_at = COALESCE(completed_at, $1), updated_at = NOW()
            WHERE client_id = $2
            "#,
        )
        .bind(now)
        .bind(client_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // =========================================================================
    //  ACOMPANHAMENTO DIÁRIO
    // =========================================================================

    // Criado uma única vez, quando o onboarding conclui. Reconclusão da
    // tarefa terminal cai no DO NOTHING.
    pub async fn insert_tracking_if_absent<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        day: DiaSemana,
        traffic_manager_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_tracking (
                client_id, current_day, last_moved_at, is_delayed, traffic_manager_id
            )
            VALUES ($1, $2, $3, FALSE, $4)
            ON CONFLICT (client_id) DO NOTHING
            "#,
        )
        .bind(client_id)
        .bind(day)
        .bind(now)
        .bind(traffic_manager_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn get_tracking(&self, client_id: Uuid) -> Result<Option<DailyTracking>, AppError> {
        let tracking = sqlx::query_as::<_, DailyTracking>(
            "SELECT * FROM daily_tracking WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tracking)
    }
}

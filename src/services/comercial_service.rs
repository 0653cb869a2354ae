// src/services/comercial_service.rs
//
// Variante comercial do motor de avanço: só duas transições fixas.
// Agendar consultoria -> consultoria_marcada (+ tarefa de realizar);
// realizar consultoria -> em_acompanhamento (+ acompanhamento do consultor).

use serde::Serialize;
use sqlx::{Acquire, Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{calendar::Calendar, error::AppError},
    db::{ClientRepository, ComercialRepository},
    models::comercial::{ComercialTask, ComercialTaskType, ComercialTracking},
    services::OperationContext,
};

// Prazo da tarefa de realizar a consultoria, em dias.
const REALIZAR_CONSULTORIA_OFFSET_DAYS: i64 = 2;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComercialOutcome {
    pub task_completed: bool,
    pub client_moved: bool,
    pub tasks_created: u32,
    pub tracking_created: bool,
}

#[derive(Clone)]
pub struct ComercialService {
    repo: ComercialRepository,
    client_repo: ClientRepository,
    calendar: Calendar,
}

impl ComercialService {
    pub fn new(repo: ComercialRepository, client_repo: ClientRepository, calendar: Calendar) -> Self {
        Self {
            repo,
            client_repo,
            calendar,
        }
    }

    pub async fn complete_task<'e, E>(
        &self,
        conn: E,
        ctx: &OperationContext,
        task_id: Uuid,
        task_type: ComercialTaskType,
        client_id: Uuid,
        client_name: &str,
    ) -> Result<ComercialOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;
        let now = self.calendar.now();

        self.repo.complete_task(&mut *tx, task_id, now).await?;

        let client = self
            .client_repo
            .find_by_id(&mut *tx, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let outcome = match task_type {
            ComercialTaskType::AgendarConsultoria => {
                // Marca a consultoria e carimba (uma vez) o início do
                // onboarding comercial.
                self.client_repo
                    .mark_consultoria_marcada(&mut *tx, client_id, now)
                    .await?;

                let title = format!("Realizar consultoria - {client_name}");
                let created = self
                    .repo
                    .insert_task_if_absent(
                        &mut *tx,
                        client_id,
                        ComercialTaskType::RealizarConsultoria,
                        &title,
                        ctx.target_manager.or(client.consultant_id),
                        self.calendar.due_date(now, REALIZAR_CONSULTORIA_OFFSET_DAYS),
                    )
                    .await?;

                ComercialOutcome {
                    task_completed: true,
                    client_moved: true,
                    tasks_created: u32::from(created),
                    tracking_created: false,
                }
            }
            ComercialTaskType::RealizarConsultoria => {
                self.client_repo
                    .set_comercial_status(
                        &mut *tx,
                        client_id,
                        crate::models::client::ComercialStatus::EmAcompanhamento,
                    )
                    .await?;

                // Acompanhamento só se houver consultor identificado.
                let tracking_created = match ctx.target_manager.or(client.consultant_id) {
                    Some(consultant_id) => {
                        self.repo
                            .insert_tracking_if_absent(&mut *tx, client_id, consultant_id)
                            .await?
                    }
                    None => false,
                };

                ComercialOutcome {
                    task_completed: true,
                    client_moved: true,
                    tasks_created: 0,
                    tracking_created,
                }
            }
        };

        tx.commit().await?;

        tracing::info!(
            "✅ Tarefa comercial {:?} concluída para '{}'",
            task_type,
            client_name
        );

        Ok(outcome)
    }

    pub async fn find_task<'e, E>(
        &self,
        executor: E,
        task_id: Uuid,
    ) -> Result<Option<ComercialTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.find_task_by_id(executor, task_id).await
    }

    pub async fn list_tasks(&self, client_id: Uuid) -> Result<Vec<ComercialTask>, AppError> {
        self.repo.list_tasks(client_id).await
    }

    pub async fn get_tracking(
        &self,
        client_id: Uuid,
    ) -> Result<Option<ComercialTracking>, AppError> {
        self.repo.get_tracking(client_id).await
    }
}

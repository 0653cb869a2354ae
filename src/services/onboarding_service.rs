// src/services/onboarding_service.rs
//
// O motor de avanço do onboarding. Concluir uma tarefa avançadora move o
// cliente para a próxima etapa/marco, cria as tarefas seguintes e, na
// tarefa terminal, promove o cliente para o acompanhamento diário.
// Tudo roda dentro de UMA transação: ou o avanço inteiro entra, ou nada.

use serde::Serialize;
use sqlx::{Acquire, Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{calendar::Calendar, error::AppError},
    db::{ClientRepository, OnboardingRepository},
    models::client::ClientStatus,
    models::onboarding::{
        ClientOnboarding, DailyTracking, DiaSemana, OnboardingStep, OnboardingTask, TaskType,
    },
    services::OperationContext,
    services::definitions::AdvanceDefinition,
};

// Resumo devolvido à UI para montar o toast.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceOutcome {
    pub task_completed: bool,
    // Tarefa sem definição de avanço: concluída, mas o cliente não se move.
    pub auxiliary_task: bool,
    pub client_moved: bool,
    pub tasks_created: u32,
    pub next_milestone: Option<i32>,
    pub onboarding_completed: bool,
    pub tracking_day: Option<DiaSemana>,
    pub tracking_day_name: Option<String>,
}

impl AdvanceOutcome {
    fn auxiliary() -> Self {
        Self {
            task_completed: true,
            auxiliary_task: true,
            client_moved: false,
            tasks_created: 0,
            next_milestone: None,
            onboarding_completed: false,
            tracking_day: None,
            tracking_day_name: None,
        }
    }
}

// O plano de avanço, calculado de forma pura a partir da definição e do
// estado atual. Separado da aplicação para poder ser testado sem banco.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancePlan {
    pub next_step: OnboardingStep,
    pub next_milestone: i32,
    // Some(n) quando o número do marco realmente sobe: é aí que o início
    // do marco n é carimbado.
    pub starts_milestone: Option<i32>,
    pub promote_to_onboarding: bool,
    pub completes_onboarding: bool,
    pub follow_ups: Vec<TaskType>,
}

pub fn plan_advance(
    def: &AdvanceDefinition,
    client_status: ClientStatus,
    current_milestone: i32,
) -> AdvancePlan {
    let follow_ups = if def.completes_onboarding {
        // Terminal não cria nada depois de si.
        Vec::new()
    } else if !def.follow_up_tasks.is_empty() {
        def.follow_up_tasks.to_vec()
    } else {
        def.next_task.into_iter().collect()
    };

    AdvancePlan {
        next_step: def.next_step,
        next_milestone: def.next_milestone,
        starts_milestone: (def.next_milestone > current_milestone).then_some(def.next_milestone),
        promote_to_onboarding: !def.completes_onboarding
            && client_status == ClientStatus::NovoCliente,
        completes_onboarding: def.completes_onboarding,
        follow_ups,
    }
}

#[derive(Clone)]
pub struct OnboardingService {
    repo: OnboardingRepository,
    client_repo: ClientRepository,
    calendar: Calendar,
}

impl OnboardingService {
    pub fn new(repo: OnboardingRepository, client_repo: ClientRepository, calendar: Calendar) -> Self {
        Self {
            repo,
            client_repo,
            calendar,
        }
    }

    // Operação central: concluir uma tarefa de onboarding.
    //
    // 1. Marca a tarefa como concluída (incondicional, auxiliares incluídas).
    // 2. Sem definição de avanço -> auxiliar, não move o cliente.
    // 3. Com definição -> aplica o plano: etapa/marco, promoção de status,
    //    conclusão do onboarding (quadro diário) e tarefas seguintes.
    pub async fn complete_task<'e, E>(
        &self,
        conn: E,
        ctx: &OperationContext,
        task_id: Uuid,
        task_type: TaskType,
        client_id: Uuid,
        client_name: &str,
    ) -> Result<AdvanceOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;
        let now = self.calendar.now();

        self.repo.complete_task(&mut *tx, task_id, now).await?;

        let Some(def) = task_type.definition() else {
            tx.commit().await?;
            tracing::info!(
                "✅ Tarefa auxiliar {:?} concluída para '{}' (cliente não se move)",
                task_type,
                client_name
            );
            return Ok(AdvanceOutcome::auxiliary());
        };

        let client = self
            .client_repo
            .find_by_id(&mut *tx, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        // Criação preguiçosa: primeiro avanço sem registro começa no marco 1.
        let onboarding = match self.repo.get_onboarding(&mut *tx, client_id).await? {
            Some(onboarding) => onboarding,
            None => self.repo.create_onboarding(&mut *tx, client_id).await?,
        };

        let plan = plan_advance(def, client.status, onboarding.current_milestone);

        self.repo
            .advance(
                &mut *tx,
                client_id,
                plan.next_step,
                plan.next_milestone,
                plan.starts_milestone,
                now,
            )
            .await?;

        let mut tracking_day = None;
        if plan.completes_onboarding {
            self.client_repo.activate(&mut *tx, client_id, now).await?;
            self.repo.complete_onboarding(&mut *tx, client_id, now).await?;

            let day = self.calendar.dia_da_semana(now);
            self.repo
                .insert_tracking_if_absent(&mut *tx, client_id, day, client.traffic_manager_id, now)
                .await?;
            tracking_day = Some(day);
        } else if plan.promote_to_onboarding {
            self.client_repo
                .promote_to_onboarding(&mut *tx, client_id, now)
                .await?;
        }

        // Tarefas seguintes: inserção condicional por tipo. Repetir a
        // conclusão não duplica nada, o banco garante.
        let mut tasks_created = 0u32;
        let assigned_to = ctx.target_manager.or(client.traffic_manager_id);
        for follow_up in &plan.follow_ups {
            let card = follow_up.card();
            let created = self
                .repo
                .insert_task_if_absent(
                    &mut *tx,
                    client_id,
                    *follow_up,
                    &card.render_title(client_name),
                    &card.render_description(client_name),
                    card.milestone,
                    assigned_to,
                    self.calendar.due_date(now, card.due_offset_days),
                )
                .await?;
            if created {
                tasks_created += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "🚀 Cliente '{}' avançou para a etapa {:?} (marco {}), {} tarefa(s) criada(s)",
            client_name,
            plan.next_step,
            plan.next_milestone,
            tasks_created
        );

        Ok(AdvanceOutcome {
            task_completed: true,
            auxiliary_task: false,
            client_moved: true,
            tasks_created,
            next_milestone: Some(plan.next_milestone),
            onboarding_completed: plan.completes_onboarding,
            tracking_day,
            tracking_day_name: tracking_day.map(|d| d.display_name().to_string()),
        })
    }

    // --- CONSULTAS (passthrough para a UI) ---

    pub async fn get_onboarding<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<Option<ClientOnboarding>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_onboarding(executor, client_id).await
    }

    pub async fn list_tasks(&self, client_id: Uuid) -> Result<Vec<OnboardingTask>, AppError> {
        self.repo.list_tasks(client_id).await
    }

    pub async fn get_tracking(&self, client_id: Uuid) -> Result<Option<DailyTracking>, AppError> {
        self.repo.get_tracking(client_id).await
    }

    pub async fn find_task<'e, E>(
        &self,
        executor: E,
        task_id: Uuid,
    ) -> Result<Option<OnboardingTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.find_task_by_id(executor, task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cenário 1 do funil: marcar_call_1 com cliente novo.
    #[test]
    fn first_task_promotes_new_client_and_schedules_the_call() {
        let def = TaskType::MarcarCall1.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::NovoCliente, 1);

        assert!(plan.promote_to_onboarding);
        assert!(!plan.completes_onboarding);
        assert_eq!(plan.next_step, OnboardingStep::Call1Marcada);
        assert_eq!(plan.next_milestone, 1);
        assert_eq!(plan.starts_milestone, None);
        assert_eq!(plan.follow_ups, vec![TaskType::RealizarCall1]);
    }

    // Cenário 2: publicar_campanha conclui o onboarding sem criar tarefas.
    #[test]
    fn terminal_task_completes_onboarding_without_follow_ups() {
        let def = TaskType::PublicarCampanha.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::Onboarding, 5);

        assert!(plan.completes_onboarding);
        assert!(plan.follow_ups.is_empty());
        assert!(!plan.promote_to_onboarding);
        assert_eq!(plan.next_milestone, 6);
        assert_eq!(plan.starts_milestone, Some(6));
        assert_eq!(plan.next_step, OnboardingStep::CampanhaPublicada);
    }

    // Cenário 3: brifar_criativos dispara o lote de quatro e sobe 3 -> 4.
    #[test]
    fn briefing_task_spawns_the_batch_and_advances_one_milestone() {
        let def = TaskType::BrifarCriativos.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::Onboarding, 3);

        assert_eq!(plan.follow_ups.len(), 4);
        assert_eq!(plan.next_milestone, 4);
        assert_eq!(plan.starts_milestone, Some(4));
        assert!(plan.follow_ups.contains(&TaskType::AnexarLinkConsultoria));
        assert!(plan.follow_ups.contains(&TaskType::CertificarConsultoria));
        assert!(plan.follow_ups.contains(&TaskType::EnviarLinkDrive));
        assert!(plan.follow_ups.contains(&TaskType::AprovarCriativos));
    }

    // Reconcluir uma tarefa antiga não pode carimbar marco de novo.
    #[test]
    fn recompleting_an_old_task_does_not_restart_a_milestone() {
        let def = TaskType::MarcarCall1.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::Onboarding, 4);

        assert_eq!(plan.starts_milestone, None);
        assert!(!plan.promote_to_onboarding);
    }

    #[test]
    fn terminal_task_never_promotes_to_onboarding() {
        let def = TaskType::PublicarCampanha.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::NovoCliente, 5);

        assert!(!plan.promote_to_onboarding);
        assert!(plan.completes_onboarding);
    }

    #[test]
    fn single_successor_becomes_the_only_follow_up() {
        let def = TaskType::ConfigurarCampanha.definition().unwrap();
        let plan = plan_advance(def, ClientStatus::Onboarding, 5);

        assert_eq!(plan.follow_ups, vec![TaskType::PublicarCampanha]);
        assert_eq!(plan.starts_milestone, None);
    }
}

// src/services/delay_service.rs
//
// Detecção de atrasos. Uma varredura periódica (tokio interval disparado
// no main, primeiro tick imediato) compara o tempo decorrido com limiares
// fixos e emite notificações deduplicadas por (usuário, tipo, cliente).

use serde::Serialize;
use sqlx::{Acquire, Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{calendar::Calendar, error::AppError},
    db::{ClientRepository, NotificationRepository},
    models::auth::{User, UserRole},
    models::client::ComercialStatus,
    models::notification::{DelayJustification, NotificationType},
};

use chrono::{DateTime, Utc};

// Limiar para cliente novo sem consultoria marcada.
pub const NOVO_CLIENTE_LIMIT_HOURS: i64 = 24;
// Limiar para cliente parado no onboarding comercial.
pub const ONBOARDING_LIMIT_DAYS: i64 = 5;

// Comparações por piso: 23h59m ainda não estourou, 24h00m estourou.
pub fn novo_cliente_overdue(entered_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    Calendar::elapsed_hours(entered_at, now) >= NOVO_CLIENTE_LIMIT_HOURS
}

pub fn onboarding_overdue(started_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match started_at {
        Some(started_at) => Calendar::elapsed_days(started_at, now) >= ONBOARDING_LIMIT_DAYS,
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub clients_scanned: u32,
    pub novo_cliente_24h: u32,
    pub onboarding_5d: u32,
}

#[derive(Clone)]
pub struct DelayService {
    repo: NotificationRepository,
    client_repo: ClientRepository,
    calendar: Calendar,
}

impl DelayService {
    pub fn new(repo: NotificationRepository, client_repo: ClientRepository, calendar: Calendar) -> Self {
        Self {
            repo,
            client_repo,
            calendar,
        }
    }

    // Varre os dois conjuntos disjuntos de clientes. Cliente sem consultor
    // atribuído é pulado: não há para quem notificar.
    pub async fn scan<'e, E>(&self, executor: E) -> Result<ScanReport, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let now = self.calendar.now();
        let mut report = ScanReport {
            clients_scanned: 0,
            novo_cliente_24h: 0,
            onboarding_5d: 0,
        };

        let mut tx = executor.begin().await?;

        let novos = self
            .client_repo
            .list_by_comercial_status(&[ComercialStatus::Novo])
            .await?;
        for client in &novos {
            report.clients_scanned += 1;
            let Some(consultant_id) = client.consultant_id else {
                continue;
            };
            if novo_cliente_overdue(client.comercial_entered_at, now) {
                let message = format!(
                    "Cliente '{}' está há mais de {}h sem consultoria marcada.",
                    client.name, NOVO_CLIENTE_LIMIT_HOURS
                );
                let inserted = self
                    .repo
                    .insert_delay_if_absent(
                        &mut *tx,
                        consultant_id,
                        NotificationType::NovoCliente24h,
                        client.id,
                        &message,
                    )
                    .await?;
                if inserted {
                    report.novo_cliente_24h += 1;
                }
            }
        }

        let em_onboarding = self
            .client_repo
            .list_by_comercial_status(&[
                ComercialStatus::ConsultoriaMarcada,
                ComercialStatus::ConsultoriaRealizada,
            ])
            .await?;
        for client in &em_onboarding {
            report.clients_scanned += 1;
            let Some(consultant_id) = client.consultant_id else {
                continue;
            };
            if onboarding_overdue(client.comercial_onboarding_started_at, now) {
                let message = format!(
                    "Cliente '{}' está há mais de {} dias parado no onboarding comercial.",
                    client.name, ONBOARDING_LIMIT_DAYS
                );
                let inserted = self
                    .repo
                    .insert_delay_if_absent(
                        &mut *tx,
                        consultant_id,
                        NotificationType::Onboarding5d,
                        client.id,
                        &message,
                    )
                    .await?;
                if inserted {
                    report.onboarding_5d += 1;
                }
            }
        }

        tx.commit().await?;

        if report.novo_cliente_24h + report.onboarding_5d > 0 {
            tracing::info!(
                "⏰ Varredura de atrasos: {} cliente(s), {} novo(s) 24h, {} onboarding 5d",
                report.clients_scanned,
                report.novo_cliente_24h,
                report.onboarding_5d
            );
        }

        Ok(report)
    }

    // Justificar apaga a notificação; a justificativa vira o registro
    // permanente. Tudo na mesma transação.
    pub async fn justify<'e, E>(
        &self,
        conn: E,
        user: &User,
        notification_id: Uuid,
        justification: &str,
    ) -> Result<DelayJustification, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let notification = self
            .repo
            .find_by_id(&mut *tx, notification_id)
            .await?
            .ok_or(AppError::NotificationNotFound)?;

        // Só o dono da notificação (ou um admin) pode justificar.
        if notification.user_id != user.id && user.role != UserRole::Admin {
            return Err(AppError::Forbidden);
        }

        let row = self
            .repo
            .insert_justification(
                &mut *tx,
                notification.user_id,
                notification.notification_type,
                notification.client_id,
                justification,
            )
            .await?;

        self.repo.delete(&mut *tx, notification_id).await?;

        tx.commit().await?;

        Ok(row)
    }

    // Arquivamento é soft-delete e privilégio de admin.
    pub async fn archive_justification<'e, E>(
        &self,
        executor: E,
        user: &User,
        justification_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if user.role != UserRole::Admin {
            return Err(AppError::Forbidden);
        }

        let updated = self
            .repo
            .archive_justification(executor, justification_id)
            .await?;
        if updated == 0 {
            return Err(AppError::JustificationNotFound);
        }

        Ok(())
    }

    pub async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<crate::models::notification::Notification>, AppError> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn list_justifications(
        &self,
        include_archived: bool,
    ) -> Result<Vec<DelayJustification>, AppError> {
        self.repo.list_justifications(include_archived).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn novo_cliente_does_not_trigger_at_23h59() {
        let entered = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 11, 8, 59, 0).unwrap();
        assert!(!novo_cliente_overdue(entered, now));
    }

    #[test]
    fn novo_cliente_triggers_at_exactly_24h() {
        let entered = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();
        assert!(novo_cliente_overdue(entered, now));
    }

    #[test]
    fn onboarding_does_not_trigger_one_minute_before_five_days() {
        let started = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 8, 59, 0).unwrap();
        assert!(!onboarding_overdue(Some(started), now));
    }

    #[test]
    fn onboarding_triggers_at_exactly_five_days() {
        let started = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();
        assert!(onboarding_overdue(Some(started), now));
    }

    #[test]
    fn onboarding_without_start_stamp_never_triggers() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();
        assert!(!onboarding_overdue(None, now));
    }
}

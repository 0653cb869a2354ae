// src/services/kanban_service.rs
//
// Movimentação de cartão com gatilho de conclusão: quando o cartão ENTRA
// no status terminal do quadro (não quando é reordenado dentro dele),
// quem abriu o cartão recebe uma notificação.

use serde::Serialize;
use sqlx::{Acquire, Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{KanbanRepository, NotificationRepository},
    models::kanban::{CreateCardPayload, KanbanBoard, KanbanCard},
    services::OperationContext,
};

// Só notifica na entrada genuína no status terminal do quadro.
pub fn should_notify(board: KanbanBoard, previous_status: &str, new_status: &str) -> bool {
    new_status == board.terminal_status() && previous_status != new_status
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub moved: bool,
    pub notified_requester: bool,
}

#[derive(Clone)]
pub struct KanbanService {
    repo: KanbanRepository,
    notification_repo: NotificationRepository,
}

impl KanbanService {
    pub fn new(repo: KanbanRepository, notification_repo: NotificationRepository) -> Self {
        Self {
            repo,
            notification_repo,
        }
    }

    pub async fn move_card<'e, E>(
        &self,
        conn: E,
        _ctx: &OperationContext,
        card_id: Uuid,
        new_status: &str,
    ) -> Result<MoveOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let card = self
            .repo
            .find_card(&mut *tx, card_id)
            .await?
            .ok_or(AppError::CardNotFound)?;

        // Reordenação dentro da mesma coluna: nada a fazer.
        if card.status == new_status {
            tx.commit().await?;
            return Ok(MoveOutcome {
                moved: false,
                notified_requester: false,
            });
        }

        self.repo.update_status(&mut *tx, card_id, new_status).await?;

        let notify = should_notify(card.board, &card.status, new_status);
        if notify {
            let message = format!("O cartão '{}' foi concluído e aguarda sua revisão.", card.title);
            self.notification_repo
                .insert_card_completed(&mut *tx, card.created_by, card.id, &message)
                .await?;
        }

        tx.commit().await?;

        if notify {
            tracing::info!(
                "📣 Cartão '{}' entrou em '{}', solicitante notificado",
                card.title,
                new_status
            );
        }

        Ok(MoveOutcome {
            moved: true,
            notified_requester: notify,
        })
    }

    pub async fn create_card(
        &self,
        ctx: &OperationContext,
        payload: &CreateCardPayload,
    ) -> Result<KanbanCard, AppError> {
        self.repo.create_card(payload, ctx.user_id).await
    }

    pub async fn list_board(&self, board: KanbanBoard) -> Result<Vec<KanbanCard>, AppError> {
        self.repo.list_board(board).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_the_terminal_status_notifies() {
        assert!(should_notify(
            KanbanBoard::Design,
            "em_andamento",
            "aguardando_aprovacao"
        ));
        assert!(should_notify(KanbanBoard::Video, "editando", "gravado"));
        assert!(should_notify(
            KanbanBoard::Producao,
            "fila",
            "para_aprovacao"
        ));
    }

    #[test]
    fn reordering_inside_the_terminal_status_does_not_notify() {
        assert!(!should_notify(
            KanbanBoard::Design,
            "aguardando_aprovacao",
            "aguardando_aprovacao"
        ));
    }

    #[test]
    fn moving_to_a_non_terminal_status_does_not_notify() {
        assert!(!should_notify(KanbanBoard::Design, "fila", "em_andamento"));
        // Status terminal de OUTRO quadro não dispara neste.
        assert!(!should_notify(KanbanBoard::Video, "editando", "aguardando_aprovacao"));
    }
}

// src/db/kanban_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::kanban::{CreateCardPayload, KanbanBoard, KanbanCard},
};

#[derive(Clone)]
pub struct KanbanRepository {
    pool: PgPool,
}

impl KanbanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_card(
        &self,
        payload: &CreateCardPayload,
        created_by: Uuid,
    ) -> Result<KanbanCard, AppError> {
        let card = sqlx::query_as::<_, KanbanCard>(
            r#"
            INSERT INTO kanban_cards (board, client_id, title, status, created_by, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.board)
        .bind(payload.client_id)
        .bind(&payload.title)
        .bind(&payload.status)
        .bind(created_by)
        .bind(payload.assigned_to)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn find_card<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<KanbanCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let card = sqlx::query_as::<_, KanbanCard>("SELECT * FROM kanban_cards WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(card)
    }

    pub async fn list_board(&self, board: KanbanBoard) -> Result<Vec<KanbanCard>, AppError> {
        let cards = sqlx::query_as::<_, KanbanCard>(
            "SELECT * FROM kanban_cards WHERE board = $1 ORDER BY created_at DESC",
        )
        .bind(board)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE kanban_cards SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}

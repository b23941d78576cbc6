use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;

use kernel::model::{
    conflict::{event::ResolveConflict, BookingConflict},
    id::BookingId,
};
use kernel::repository::conflict::ConflictRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::conflict::ConflictRow, ConnectionPool};

#[derive(new)]
pub struct ConflictRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ConflictRepository for ConflictRepositoryImpl {
    async fn find_unresolved_all(&self) -> AppResult<Vec<BookingConflict>> {
        let rows: Vec<ConflictRow> = sqlx::query_as(
            r#"
                SELECT
                    conflict_id,
                    booking_id,
                    conflicting_booking_id,
                    conflict_type,
                    severity,
                    description,
                    is_resolved,
                    resolved_by,
                    resolved_at,
                    resolution,
                    created_at AS detected_at
                FROM booking_conflicts
                WHERE is_resolved = FALSE
                ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(BookingConflict::from).collect())
    }

    async fn find_by_booking_id(&self, booking_id: BookingId) -> AppResult<Vec<BookingConflict>> {
        let rows: Vec<ConflictRow> = sqlx::query_as(
            r#"
                SELECT
                    conflict_id,
                    booking_id,
                    conflicting_booking_id,
                    conflict_type,
                    severity,
                    description,
                    is_resolved,
                    resolved_by,
                    resolved_at,
                    resolution,
                    created_at AS detected_at
                FROM booking_conflicts
                WHERE booking_id = $1 OR conflicting_booking_id = $1
                ORDER BY created_at ASC
            "#,
        )
        .bind(booking_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(BookingConflict::from).collect())
    }

    async fn resolve(&self, event: ResolveConflict) -> AppResult<()> {
        // 解決済みの競合を再度解決することはできない
        let res = sqlx::query(
            r#"
                UPDATE booking_conflicts
                SET
                    is_resolved = TRUE,
                    resolved_by = $2,
                    resolved_at = $3,
                    resolution = $4
                WHERE conflict_id = $1 AND is_resolved = FALSE
            "#,
        )
        .bind(event.conflict_id)
        .bind(event.resolved_by)
        .bind(Utc::now())
        .bind(event.resolution)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "未解決の競合（{}）が見つかりませんでした。",
                event.conflict_id
            )));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use derive_new::new;

use kernel::model::{booking_update::BookingUpdate, id::BookingId};
use kernel::repository::booking_update::BookingUpdateRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::booking_update::BookingUpdateRow, ConnectionPool};

#[derive(new)]
pub struct BookingUpdateRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingUpdateRepository for BookingUpdateRepositoryImpl {
    async fn find_by_booking_id(&self, booking_id: BookingId) -> AppResult<Vec<BookingUpdate>> {
        let rows: Vec<BookingUpdateRow> = sqlx::query_as(
            r#"
                SELECT
                    update_id,
                    booking_id,
                    update_type,
                    previous_data,
                    new_data,
                    updated_by,
                    timestamp,
                    broadcast_channels,
                    notification_sent
                FROM real_time_booking_updates
                WHERE booking_id = $1
                ORDER BY timestamp ASC
            "#,
        )
        .bind(booking_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(BookingUpdate::from).collect())
    }

    async fn find_unsent_all(&self) -> AppResult<Vec<BookingUpdate>> {
        let rows: Vec<BookingUpdateRow> = sqlx::query_as(
            r#"
                SELECT
                    update_id,
                    booking_id,
                    update_type,
                    previous_data,
                    new_data,
                    updated_by,
                    timestamp,
                    broadcast_channels,
                    notification_sent
                FROM real_time_booking_updates
                WHERE notification_sent = FALSE
                ORDER BY timestamp ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(BookingUpdate::from).collect())
    }
}

use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{booking_update::BookingUpdate, id::BookingId};

// 行の追記は予約の書き込みと同一トランザクションで行うため
// BookingRepository 側の責務になっている。ここは読み取りのみ
#[async_trait]
pub trait BookingUpdateRepository: Send + Sync {
    async fn find_by_booking_id(&self, booking_id: BookingId) -> AppResult<Vec<BookingUpdate>>;
    async fn find_unsent_all(&self) -> AppResult<Vec<BookingUpdate>>;
}

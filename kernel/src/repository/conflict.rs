use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    conflict::{event::ResolveConflict, BookingConflict},
    id::BookingId,
};

#[async_trait]
pub trait ConflictRepository: Send + Sync {
    async fn find_unresolved_all(&self) -> AppResult<Vec<BookingConflict>>;
    async fn find_by_booking_id(&self, booking_id: BookingId) -> AppResult<Vec<BookingConflict>>;
    async fn resolve(&self, event: ResolveConflict) -> AppResult<()>;
}

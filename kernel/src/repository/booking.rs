use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{
            CancelBooking, CheckInBooking, CheckOutBooking, CompleteBooking, ConfirmBooking,
            CreateBooking, RescheduleBooking,
        },
        BookingWindow, CreatedBooking, FacilityBooking,
    },
    id::{BookingId, FacilityId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約を作成する。検出した競合は記録したうえで戻り値として返す
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking>;
    // 時間帯を変更する。新しい時間帯で作成時と同じ検証をやり直す
    async fn reschedule(&self, event: RescheduleBooking) -> AppResult<CreatedBooking>;
    async fn confirm(&self, event: ConfirmBooking) -> AppResult<()>;
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
    async fn complete(&self, event: CompleteBooking) -> AppResult<()>;
    async fn check_in(&self, event: CheckInBooking) -> AppResult<()>;
    async fn check_out(&self, event: CheckOutBooking) -> AppResult<()>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<FacilityBooking>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<FacilityBooking>>;
    async fn find_by_facility_id(
        &self,
        facility_id: FacilityId,
        range: Option<BookingWindow>,
    ) -> AppResult<Vec<FacilityBooking>>;
}

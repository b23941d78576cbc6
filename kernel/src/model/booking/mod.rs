use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{
    conflict::BookingConflict,
    id::{BookingId, FacilityId, TeamId, UserId},
};

pub mod event;

// 予約の占有時間帯。半開区間 [start, end) として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    // pending → confirmed → completed。未終了の状態からは cancelled へ遷移できる
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

// 予約が必要とする備品。equipment_needed カラム（JSONB）にこの形で入る
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentNeed {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct FacilityBooking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub team_id: Option<TeamId>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub attendee_count: Option<i32>,
    pub equipment_needed: Vec<EquipmentNeed>,
    pub cost: Option<Decimal>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub facility: BookingFacility,
}

#[derive(Debug, Clone)]
pub struct BookingFacility {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: String,
    pub capacity: Option<i32>,
    pub is_active: bool,
}

impl FacilityBooking {
    pub fn window(&self) -> BookingWindow {
        BookingWindow::new(self.start_time, self.end_time)
    }

    pub fn can_confirm(&self) -> bool {
        self.status.can_transition_to(BookingStatus::Confirmed)
            && self.payment_status != PaymentStatus::Failed
    }

    // 完了はチェックアウト済みかつ終了時刻を過ぎてから
    pub fn can_complete(&self, now: DateTime<Utc>) -> bool {
        self.status.can_transition_to(BookingStatus::Completed)
            && self.checked_out_at.is_some()
            && now >= self.end_time
    }

    pub fn can_cancel(&self) -> bool {
        !self.status.is_terminal()
    }

    // チェックインは confirmed の間のみ。開始前は grace の分だけ早く受け付ける
    pub fn can_check_in(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        self.status == BookingStatus::Confirmed
            && self.checked_in_at.is_none()
            && now >= self.start_time - grace
            && now <= self.end_time
    }

    pub fn can_check_out(&self) -> bool {
        self.checked_in_at.is_some() && self.checked_out_at.is_none()
    }
}

// 予約作成・予定変更の戻り値。検出された競合を呼び出し元へ返す
#[derive(Debug)]
pub struct CreatedBooking {
    pub booking_id: BookingId,
    pub conflicts: Vec<BookingConflict>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(status: BookingStatus) -> FacilityBooking {
        let start = Utc.with_ymd_and_hms(2025, 7, 7, 10, 0, 0).unwrap();
        FacilityBooking {
            booking_id: BookingId::new(),
            booked_by: UserId::new(),
            team_id: None,
            title: "Practice".into(),
            description: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            status,
            payment_status: PaymentStatus::Pending,
            attendee_count: None,
            equipment_needed: vec![],
            cost: None,
            checked_in_at: None,
            checked_out_at: None,
            facility: BookingFacility {
                facility_id: FacilityId::new(),
                facility_name: "Main Court".into(),
                facility_type: "basketball".into(),
                capacity: Some(30),
                is_active: true,
            },
        }
    }

    #[test]
    fn test_window_overlaps_is_half_open() {
        let start = Utc.with_ymd_and_hms(2025, 7, 7, 10, 0, 0).unwrap();
        let a = BookingWindow::new(start, start + Duration::hours(1));
        // 終了時刻と開始時刻がぴったり接する場合は重ならない
        let b = BookingWindow::new(start + Duration::hours(1), start + Duration::hours(2));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = BookingWindow::new(start + Duration::minutes(30), start + Duration::minutes(90));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_status_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_confirm_requires_payment_not_failed() {
        let mut b = booking(BookingStatus::Pending);
        assert!(b.can_confirm());

        b.payment_status = PaymentStatus::Failed;
        assert!(!b.can_confirm());

        let b = booking(BookingStatus::Confirmed);
        assert!(!b.can_confirm());
    }

    #[test]
    fn test_complete_requires_check_out_and_elapsed_end() {
        let mut b = booking(BookingStatus::Confirmed);
        let after_end = b.end_time + Duration::minutes(5);

        // チェックアウト前は完了できない
        assert!(!b.can_complete(after_end));

        b.checked_in_at = Some(b.start_time);
        b.checked_out_at = Some(b.end_time);
        assert!(b.can_complete(after_end));

        // 終了時刻前は完了できない
        assert!(!b.can_complete(b.end_time - Duration::minutes(5)));
    }

    #[test]
    fn test_cancel_allowed_from_non_terminal_only() {
        assert!(booking(BookingStatus::Pending).can_cancel());
        assert!(booking(BookingStatus::Confirmed).can_cancel());
        assert!(!booking(BookingStatus::Cancelled).can_cancel());
        assert!(!booking(BookingStatus::Completed).can_cancel());
    }

    #[test]
    fn test_check_in_window_with_grace() {
        let b = booking(BookingStatus::Confirmed);
        let grace = Duration::minutes(15);

        assert!(b.can_check_in(b.start_time - Duration::minutes(10), grace));
        assert!(b.can_check_in(b.start_time + Duration::minutes(30), grace));
        assert!(!b.can_check_in(b.start_time - Duration::minutes(20), grace));
        assert!(!b.can_check_in(b.end_time + Duration::minutes(1), grace));

        // pending のままではチェックインできない
        let b = booking(BookingStatus::Pending);
        assert!(!b.can_check_in(b.start_time, grace));
    }

    #[test]
    fn test_check_out_requires_check_in() {
        let mut b = booking(BookingStatus::Confirmed);
        assert!(!b.can_check_out());

        b.checked_in_at = Some(b.start_time);
        assert!(b.can_check_out());

        b.checked_out_at = Some(b.end_time);
        assert!(!b.can_check_out());
    }
}

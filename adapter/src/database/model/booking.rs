use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;

use kernel::model::{
    booking::{
        BookingFacility, BookingStatus, BookingWindow, EquipmentNeed, FacilityBooking,
        PaymentStatus,
    },
    conflict::ActiveBooking,
    id::{BookingId, FacilityId, TeamId, UserId},
};

// 予約一覧・詳細を取得する際に使う型。施設情報を JOIN して持つ
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub facility_id: FacilityId,
    pub team_id: Option<TeamId>,
    pub booked_by: UserId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub attendee_count: Option<i32>,
    pub equipment_needed: Json<Vec<EquipmentNeed>>,
    pub cost: Option<Decimal>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub facility_name: String,
    pub facility_type: String,
    pub facility_capacity: Option<i32>,
    pub facility_is_active: bool,
}

impl From<BookingRow> for FacilityBooking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            facility_id,
            team_id,
            booked_by,
            title,
            description,
            start_time,
            end_time,
            status,
            payment_status,
            attendee_count,
            equipment_needed,
            cost,
            checked_in_at,
            checked_out_at,
            facility_name,
            facility_type,
            facility_capacity,
            facility_is_active,
        } = value;
        FacilityBooking {
            booking_id,
            booked_by,
            team_id,
            title,
            description,
            start_time,
            end_time,
            status,
            payment_status,
            attendee_count,
            equipment_needed: equipment_needed.0,
            cost,
            checked_in_at,
            checked_out_at,
            facility: BookingFacility {
                facility_id,
                facility_name,
                facility_type,
                capacity: facility_capacity,
                is_active: facility_is_active,
            },
        }
    }
}

// 競合検出の入力に使う、同一施設の保留・確定予約
#[derive(sqlx::FromRow)]
pub struct ActiveBookingRow {
    pub booking_id: BookingId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub equipment_needed: Json<Vec<EquipmentNeed>>,
}

impl From<ActiveBookingRow> for ActiveBooking {
    fn from(value: ActiveBookingRow) -> Self {
        let ActiveBookingRow {
            booking_id,
            start_time,
            end_time,
            equipment_needed,
        } = value;
        ActiveBooking {
            booking_id,
            window: BookingWindow::new(start_time, end_time),
            equipment_needed: equipment_needed.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_booking_row_into_facility_booking() {
        let start = Utc.with_ymd_and_hms(2025, 7, 7, 10, 0, 0).unwrap();
        let row = BookingRow {
            booking_id: BookingId::new(),
            facility_id: FacilityId::new(),
            team_id: None,
            booked_by: UserId::new(),
            title: "Practice".into(),
            description: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            attendee_count: Some(12),
            equipment_needed: Json(vec![EquipmentNeed {
                name: "scoreboard".into(),
                quantity: 1,
            }]),
            cost: None,
            checked_in_at: None,
            checked_out_at: None,
            facility_name: "Main Court".into(),
            facility_type: "basketball".into(),
            facility_capacity: Some(30),
            facility_is_active: true,
        };
        let facility_id = row.facility_id;

        let booking = FacilityBooking::from(row);
        assert_eq!(booking.facility.facility_id, facility_id);
        assert_eq!(booking.equipment_needed.len(), 1);
        assert_eq!(booking.window().duration_minutes(), 60);
    }
}

use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::{
    booking::EquipmentNeed,
    id::{BookingId, FacilityId, TeamId, UserId},
};

#[derive(new)]
pub struct CreateBooking {
    pub facility_id: FacilityId,
    pub booked_by: UserId,
    pub team_id: Option<TeamId>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendee_count: Option<i32>,
    pub equipment_needed: Vec<EquipmentNeed>,
}

#[derive(new)]
pub struct RescheduleBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(new)]
pub struct ConfirmBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CompleteBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CheckInBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CheckOutBooking {
    pub booking_id: BookingId,
    pub requested_user: UserId,
}

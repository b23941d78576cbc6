use chrono::{DateTime, NaiveTime, Utc};

use crate::model::id::{FacilityId, UnavailabilityId, UserId};

pub struct CreateAvailabilityRule {
    pub facility_id: FacilityId,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub advance_booking_days: i32,
    pub minimum_booking_duration: i32,
    pub maximum_booking_duration: i32,
    pub buffer_time_before: i32,
    pub buffer_time_after: i32,
}

pub struct CreateUnavailability {
    pub facility_id: FacilityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub created_by: UserId,
}

#[derive(Debug)]
pub struct DeleteUnavailability {
    pub unavailability_id: UnavailabilityId,
    pub facility_id: FacilityId,
    pub requested_user: UserId,
}

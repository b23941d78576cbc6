use chrono::{DateTime, NaiveTime, Utc};
use kernel::model::{
    availability::{AvailabilityRule, UnavailabilityWindow},
    id::{AvailabilityId, FacilityId, UnavailabilityId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct AvailabilityRuleRow {
    pub availability_id: AvailabilityId,
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

impl From<AvailabilityRuleRow> for AvailabilityRule {
    fn from(value: AvailabilityRuleRow) -> Self {
        let AvailabilityRuleRow {
            availability_id,
            facility_id,
            day_of_week,
            start_time,
            end_time,
            is_available,
            advance_booking_days,
            minimum_booking_duration,
            maximum_booking_duration,
            buffer_time_before,
            buffer_time_after,
        } = value;
        AvailabilityRule {
            availability_id,
            facility_id,
            day_of_week,
            start_time,
            end_time,
            is_available,
            advance_booking_days,
            minimum_booking_duration,
            maximum_booking_duration,
            buffer_time_before,
            buffer_time_after,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct UnavailabilityRow {
    pub unavailability_id: UnavailabilityId,
    pub facility_id: FacilityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub created_by: UserId,
}

impl From<UnavailabilityRow> for UnavailabilityWindow {
    fn from(value: UnavailabilityRow) -> Self {
        let UnavailabilityRow {
            unavailability_id,
            facility_id,
            start_time,
            end_time,
            reason,
            description,
            is_recurring,
            created_by,
        } = value;
        UnavailabilityWindow {
            unavailability_id,
            facility_id,
            start_time,
            end_time,
            reason,
            description,
            is_recurring,
            created_by,
        }
    }
}

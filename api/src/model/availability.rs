use chrono::{DateTime, NaiveTime, Utc};
use derive_new::new;
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::{
    availability::{
        event::{CreateAvailabilityRule, CreateUnavailability},
        AvailabilityRule, UnavailabilityWindow,
    },
    id::{AvailabilityId, FacilityId, UnavailabilityId, UserId},
};

fn default_is_available() -> bool {
    true
}

fn default_advance_booking_days() -> i32 {
    30
}

fn default_minimum_booking_duration() -> i32 {
    60
}

fn default_maximum_booking_duration() -> i32 {
    480
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRuleRequest {
    // 0 = 日曜 〜 6 = 土曜
    #[garde(range(min = 0, max = 6))]
    pub day_of_week: i16,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
    #[serde(default = "default_is_available")]
    #[garde(skip)]
    pub is_available: bool,
    #[serde(default = "default_advance_booking_days")]
    #[garde(range(min = 0))]
    pub advance_booking_days: i32,
    #[serde(default = "default_minimum_booking_duration")]
    #[garde(range(min = 1))]
    pub minimum_booking_duration: i32,
    #[serde(default = "default_maximum_booking_duration")]
    #[garde(range(min = 1))]
    pub maximum_booking_duration: i32,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub buffer_time_before: i32,
    #[serde(default)]
    #[garde(range(min = 0))]
    pub buffer_time_after: i32,
}

#[derive(new)]
pub struct CreateAvailabilityRuleRequestWithId(FacilityId, CreateAvailabilityRuleRequest);

impl From<CreateAvailabilityRuleRequestWithId> for CreateAvailabilityRule {
    fn from(value: CreateAvailabilityRuleRequestWithId) -> Self {
        let CreateAvailabilityRuleRequestWithId(
            facility_id,
            CreateAvailabilityRuleRequest {
                day_of_week,
                start_time,
                end_time,
                is_available,
                advance_booking_days,
                minimum_booking_duration,
                maximum_booking_duration,
                buffer_time_before,
                buffer_time_after,
            },
        ) = value;
        CreateAvailabilityRule {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRuleResponse {
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

impl From<AvailabilityRule> for AvailabilityRuleResponse {
    fn from(value: AvailabilityRule) -> Self {
        let AvailabilityRule {
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
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRulesResponse {
    pub items: Vec<AvailabilityRuleResponse>,
}

impl From<Vec<AvailabilityRule>> for AvailabilityRulesResponse {
    fn from(value: Vec<AvailabilityRule>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(AvailabilityRuleResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnavailabilityRequest {
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(skip)]
    pub reason: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub is_recurring: bool,
}

#[derive(new)]
pub struct CreateUnavailabilityRequestWithIds(FacilityId, UserId, CreateUnavailabilityRequest);

impl From<CreateUnavailabilityRequestWithIds> for CreateUnavailability {
    fn from(value: CreateUnavailabilityRequestWithIds) -> Self {
        let CreateUnavailabilityRequestWithIds(
            facility_id,
            created_by,
            CreateUnavailabilityRequest {
                start_time,
                end_time,
                reason,
                description,
                is_recurring,
            },
        ) = value;
        CreateUnavailability {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityResponse {
    pub unavailability_id: UnavailabilityId,
    pub facility_id: FacilityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub created_by: UserId,
}

impl From<UnavailabilityWindow> for UnavailabilityResponse {
    fn from(value: UnavailabilityWindow) -> Self {
        let UnavailabilityWindow {
            unavailability_id,
            facility_id,
            start_time,
            end_time,
            reason,
            description,
            is_recurring,
            created_by,
        } = value;
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityListResponse {
    pub items: Vec<UnavailabilityResponse>,
}

impl From<Vec<UnavailabilityWindow>> for UnavailabilityListResponse {
    fn from(value: Vec<UnavailabilityWindow>) -> Self {
        Self {
            items: value.into_iter().map(UnavailabilityResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheckQuery {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheckResponse {
    pub available: bool,
    // 拒否された場合の理由コード（outside_hours など）
    pub reason: Option<String>,
}

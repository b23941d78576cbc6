use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kernel::model::{
    booking::{
        event::{CreateBooking, RescheduleBooking},
        BookingFacility, BookingStatus, CreatedBooking, EquipmentNeed, FacilityBooking,
        PaymentStatus,
    },
    id::{BookingId, FacilityId, TeamId, UserId},
};

use crate::model::conflict::ConflictResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub team_id: Option<TeamId>,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(skip)]
    pub attendee_count: Option<i32>,
    #[serde(default)]
    #[garde(skip)]
    pub equipment_needed: Vec<EquipmentNeed>,
}

#[derive(new)]
pub struct CreateBookingRequestWithIds(FacilityId, UserId, CreateBookingRequest);

impl From<CreateBookingRequestWithIds> for CreateBooking {
    fn from(value: CreateBookingRequestWithIds) -> Self {
        let CreateBookingRequestWithIds(
            facility_id,
            booked_by,
            CreateBookingRequest {
                title,
                description,
                team_id,
                start_time,
                end_time,
                attendee_count,
                equipment_needed,
            },
        ) = value;
        CreateBooking {
            facility_id,
            booked_by,
            team_id,
            title,
            description,
            start_time,
            end_time,
            attendee_count,
            equipment_needed,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleBookingRequest {
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
}

#[derive(new)]
pub struct RescheduleBookingRequestWithIds(BookingId, UserId, RescheduleBookingRequest);

impl From<RescheduleBookingRequestWithIds> for RescheduleBooking {
    fn from(value: RescheduleBookingRequestWithIds) -> Self {
        let RescheduleBookingRequestWithIds(
            booking_id,
            requested_user,
            RescheduleBookingRequest {
                start_time,
                end_time,
            },
        ) = value;
        RescheduleBooking {
            booking_id,
            requested_user,
            start_time,
            end_time,
        }
    }
}

// 施設の予約一覧を時間帯で絞り込むためのクエリ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
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
    pub facility: BookingFacilityResponse,
}

impl From<FacilityBooking> for BookingResponse {
    fn from(value: FacilityBooking) -> Self {
        let FacilityBooking {
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
            equipment_needed,
            cost,
            checked_in_at,
            checked_out_at,
            facility,
        } = value;
        Self {
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
            equipment_needed,
            cost,
            checked_in_at,
            checked_out_at,
            facility: facility.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFacilityResponse {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: String,
    pub capacity: Option<i32>,
    pub is_active: bool,
}

impl From<BookingFacility> for BookingFacilityResponse {
    fn from(value: BookingFacility) -> Self {
        let BookingFacility {
            facility_id,
            facility_name,
            facility_type,
            capacity,
            is_active,
        } = value;
        Self {
            facility_id,
            facility_name,
            facility_type,
            capacity,
            is_active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<FacilityBooking>> for BookingsResponse {
    fn from(value: Vec<FacilityBooking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

// 作成・予定変更のレスポンス。検出された競合は警告として添付する
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub booking_id: BookingId,
    pub conflicts: Vec<ConflictResponse>,
}

impl From<CreatedBooking> for CreatedBookingResponse {
    fn from(value: CreatedBooking) -> Self {
        let CreatedBooking {
            booking_id,
            conflicts,
        } = value;
        Self {
            booking_id,
            conflicts: conflicts.into_iter().map(ConflictResponse::from).collect(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use kernel::model::{
    booking_update::{BookingUpdate, BookingUpdateType},
    id::{BookingId, BookingUpdateId, UserId},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdateResponse {
    pub update_id: BookingUpdateId,
    pub booking_id: BookingId,
    pub update_type: BookingUpdateType,
    pub previous_data: Option<Value>,
    pub new_data: Option<Value>,
    pub updated_by: UserId,
    pub timestamp: DateTime<Utc>,
    pub broadcast_channels: Vec<String>,
    pub notification_sent: bool,
}

impl From<BookingUpdate> for BookingUpdateResponse {
    fn from(value: BookingUpdate) -> Self {
        let BookingUpdate {
            update_id,
            booking_id,
            update_type,
            previous_data,
            new_data,
            updated_by,
            timestamp,
            broadcast_channels,
            notification_sent,
        } = value;
        Self {
            update_id,
            booking_id,
            update_type,
            previous_data,
            new_data,
            updated_by,
            timestamp,
            broadcast_channels,
            notification_sent,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdatesResponse {
    pub items: Vec<BookingUpdateResponse>,
}

impl From<Vec<BookingUpdate>> for BookingUpdatesResponse {
    fn from(value: Vec<BookingUpdate>) -> Self {
        Self {
            items: value.into_iter().map(BookingUpdateResponse::from).collect(),
        }
    }
}

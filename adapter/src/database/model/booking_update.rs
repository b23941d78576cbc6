use chrono::{DateTime, Utc};
use serde_json::Value;

use kernel::model::{
    booking_update::{BookingUpdate, BookingUpdateType},
    id::{BookingId, BookingUpdateId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct BookingUpdateRow {
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

impl From<BookingUpdateRow> for BookingUpdate {
    fn from(value: BookingUpdateRow) -> Self {
        let BookingUpdateRow {
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
        BookingUpdate {
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

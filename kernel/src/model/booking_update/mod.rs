use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    booking::{BookingStatus, EquipmentNeed, FacilityBooking, PaymentStatus},
    id::{BookingId, BookingUpdateId, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "booking_update_type", rename_all = "snake_case")]
pub enum BookingUpdateType {
    Created,
    Modified,
    Cancelled,
    CheckedIn,
    CheckedOut,
}

// 予約の状態変更 1 回につき 1 行の追記専用ログ。
// 配信ワーカーが notification_sent を立てるまでが通知の責務で、
// このサービスは行を作るだけ
#[derive(Debug, Clone)]
pub struct BookingUpdate {
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

// 監査ログに書き込む、予約の可変フィールドのスナップショット
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSnapshot {
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendee_count: Option<i32>,
    pub equipment_needed: Vec<EquipmentNeed>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl From<&FacilityBooking> for BookingSnapshot {
    fn from(value: &FacilityBooking) -> Self {
        Self {
            status: value.status,
            payment_status: value.payment_status,
            start_time: value.start_time,
            end_time: value.end_time,
            attendee_count: value.attendee_count,
            equipment_needed: value.equipment_needed.clone(),
            checked_in_at: value.checked_in_at,
            checked_out_at: value.checked_out_at,
        }
    }
}

// 通知のファンアウト先。施設・予約者・チームの各チャンネルに配る
pub fn broadcast_channels(booking: &FacilityBooking) -> Vec<String> {
    let mut channels = vec![
        format!("facility:{}", booking.facility.facility_id),
        format!("user:{}", booking.booked_by),
    ];
    if let Some(team_id) = booking.team_id {
        channels.push(format!("team:{}", team_id));
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::booking::BookingFacility;
    use crate::model::id::{FacilityId, TeamId};
    use chrono::TimeZone;

    fn booking(team_id: Option<TeamId>) -> FacilityBooking {
        let start = Utc.with_ymd_and_hms(2025, 7, 7, 10, 0, 0).unwrap();
        FacilityBooking {
            booking_id: BookingId::new(),
            booked_by: UserId::new(),
            team_id,
            title: "Practice".into(),
            description: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            attendee_count: Some(12),
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
    fn test_broadcast_channels_include_team_when_linked() {
        let team_id = TeamId::new();
        let b = booking(Some(team_id));
        let channels = broadcast_channels(&b);
        assert_eq!(channels.len(), 3);
        assert!(channels.contains(&format!("facility:{}", b.facility.facility_id)));
        assert!(channels.contains(&format!("user:{}", b.booked_by)));
        assert!(channels.contains(&format!("team:{}", team_id)));

        assert_eq!(broadcast_channels(&booking(None)).len(), 2);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = BookingSnapshot::from(&booking(None));
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("startTime").is_some());
        assert!(value.get("paymentStatus").is_some());
        assert_eq!(value["status"], "pending");
    }
}

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::{
    conflict::{BookingConflict, ConflictSeverity, ConflictType},
    id::{BookingId, ConflictId, UserId},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResponse {
    pub conflict_id: ConflictId,
    pub booking_id: BookingId,
    pub conflicting_booking_id: Option<BookingId>,
    pub conflict_type: ConflictType,
    pub severity: ConflictSeverity,
    pub description: Option<String>,
    pub is_resolved: bool,
    pub resolved_by: Option<UserId>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl From<BookingConflict> for ConflictResponse {
    fn from(value: BookingConflict) -> Self {
        let BookingConflict {
            conflict_id,
            booking_id,
            conflicting_booking_id,
            conflict_type,
            severity,
            description,
            is_resolved,
            resolved_by,
            resolved_at,
            resolution,
            detected_at,
        } = value;
        Self {
            conflict_id,
            booking_id,
            conflicting_booking_id,
            conflict_type,
            severity,
            description,
            is_resolved,
            resolved_by,
            resolved_at,
            resolution,
            detected_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictsResponse {
    pub items: Vec<ConflictResponse>,
}

impl From<Vec<BookingConflict>> for ConflictsResponse {
    fn from(value: Vec<BookingConflict>) -> Self {
        Self {
            items: value.into_iter().map(ConflictResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConflictRequest {
    #[garde(length(min = 1))]
    pub resolution: String,
}

use chrono::{DateTime, Utc};
use kernel::model::{
    conflict::{BookingConflict, ConflictSeverity, ConflictType},
    id::{BookingId, ConflictId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct ConflictRow {
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

impl From<ConflictRow> for BookingConflict {
    fn from(value: ConflictRow) -> Self {
        let ConflictRow {
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
        BookingConflict {
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

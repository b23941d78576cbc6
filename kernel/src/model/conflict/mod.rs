use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    booking::{BookingWindow, EquipmentNeed},
    equipment::FacilityEquipment,
    id::{BookingId, ConflictId, UserId},
};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, strum::Display)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "conflict_type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConflictType {
    TimeOverlap,
    ResourceConflict,
    CapacityExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "conflict_severity", rename_all = "snake_case")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl ConflictSeverity {
    // 開始時刻が近いほど深刻度を上げる。
    // 24 時間未満は high、7 日未満は medium、それ以外は low
    pub fn from_proximity(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let until_start = start - now;
        if until_start < Duration::hours(24) {
            Self::High
        } else if until_start < Duration::days(7) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

// 永続化された競合。解決されるまで残り、黙って消えることはない
#[derive(Debug, Clone)]
pub struct BookingConflict {
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

// 検出されたがまだ永続化されていない競合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedConflict {
    pub conflicting_booking_id: Option<BookingId>,
    pub conflict_type: ConflictType,
    pub severity: ConflictSeverity,
    pub description: String,
}

// 検出の比較対象となる、同一施設の保留・確定中の既存予約
#[derive(Debug, Clone)]
pub struct ActiveBooking {
    pub booking_id: BookingId,
    pub window: BookingWindow,
    pub equipment_needed: Vec<EquipmentNeed>,
}

// 作成・予定変更しようとしている予約
#[derive(Debug, Clone)]
pub struct ProposedBooking {
    pub window: BookingWindow,
    pub attendee_count: Option<i32>,
    pub equipment_needed: Vec<EquipmentNeed>,
}

// 競合検出。検出結果は助言であり、予約の成否はここでは決めない。
// 入力が同じなら常に同じ結果を返す
pub fn detect(
    proposed: &ProposedBooking,
    existing: &[ActiveBooking],
    equipment: &[FacilityEquipment],
    facility_capacity: Option<i32>,
    now: DateTime<Utc>,
) -> Vec<DetectedConflict> {
    let severity = ConflictSeverity::from_proximity(proposed.window.start, now);
    let mut conflicts = Vec::new();

    // 時間帯の重なり（半開区間）
    let overlapping: Vec<&ActiveBooking> = existing
        .iter()
        .filter(|b| b.window.overlaps(&proposed.window))
        .collect();
    for other in &overlapping {
        conflicts.push(DetectedConflict {
            conflicting_booking_id: Some(other.booking_id),
            conflict_type: ConflictType::TimeOverlap,
            severity,
            description: format!(
                "time overlap with booking {} ({} - {})",
                other.booking_id, other.window.start, other.window.end
            ),
        });
    }

    // 備品の在庫確認。重なっている予約に割り当て済みの数量を差し引く
    for need in &proposed.equipment_needed {
        let stock: i32 = equipment
            .iter()
            .filter(|e| e.is_usable() && e.equipment_name == need.name)
            .map(|e| e.quantity)
            .sum();
        let committed: i32 = overlapping
            .iter()
            .flat_map(|b| &b.equipment_needed)
            .filter(|n| n.name == need.name)
            .map(|n| n.quantity)
            .sum();
        if need.quantity > stock - committed {
            conflicts.push(DetectedConflict {
                conflicting_booking_id: None,
                conflict_type: ConflictType::ResourceConflict,
                severity,
                description: format!(
                    "equipment {} oversubscribed: requested {}, available {}",
                    need.name,
                    need.quantity,
                    (stock - committed).max(0)
                ),
            });
        }
    }

    // 収容人数の確認
    if let (Some(attendees), Some(capacity)) = (proposed.attendee_count, facility_capacity) {
        if attendees > capacity {
            conflicts.push(DetectedConflict {
                conflicting_booking_id: None,
                conflict_type: ConflictType::CapacityExceeded,
                severity,
                description: format!(
                    "attendee count {} exceeds facility capacity {}",
                    attendees, capacity
                ),
            });
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::equipment::EquipmentCondition;
    use crate::model::id::{EquipmentId, FacilityId};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 7, 8, 0, 0).unwrap()
    }

    fn window(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> BookingWindow {
        BookingWindow::new(
            Utc.with_ymd_and_hms(2025, 7, 7, start_h, start_m, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 7, end_h, end_m, 0).unwrap(),
        )
    }

    fn active(window: BookingWindow) -> ActiveBooking {
        ActiveBooking {
            booking_id: BookingId::new(),
            window,
            equipment_needed: vec![],
        }
    }

    fn proposed(window: BookingWindow) -> ProposedBooking {
        ProposedBooking {
            window,
            attendee_count: None,
            equipment_needed: vec![],
        }
    }

    fn equipment(name: &str, quantity: i32) -> FacilityEquipment {
        FacilityEquipment {
            equipment_id: EquipmentId::new(),
            facility_id: FacilityId::new(),
            equipment_name: name.into(),
            category: None,
            quantity,
            condition: EquipmentCondition::Good,
            last_maintenance_date: None,
            next_maintenance_date: None,
            is_available: true,
        }
    }

    #[test]
    fn test_no_conflict_for_disjoint_windows() {
        let existing = vec![active(window(10, 0, 11, 0))];
        let result = detect(&proposed(window(11, 0, 12, 0)), &existing, &[], None, now());
        assert!(result.is_empty());
    }

    #[test]
    fn test_exactly_one_overlap_conflict_per_pair() {
        // 10:00-11:00 に対する 10:30-11:30 は 10:30-11:00 で重なる
        let first = active(window(10, 0, 11, 0));
        let existing = vec![first.clone()];
        let result = detect(&proposed(window(10, 30, 11, 30)), &existing, &[], None, now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].conflict_type, ConflictType::TimeOverlap);
        assert_eq!(result[0].conflicting_booking_id, Some(first.booking_id));
    }

    #[test]
    fn test_severity_follows_proximity_policy() {
        assert_eq!(
            ConflictSeverity::from_proximity(now() + Duration::hours(2), now()),
            ConflictSeverity::High
        );
        assert_eq!(
            ConflictSeverity::from_proximity(now() + Duration::days(3), now()),
            ConflictSeverity::Medium
        );
        assert_eq!(
            ConflictSeverity::from_proximity(now() + Duration::days(10), now()),
            ConflictSeverity::Low
        );
    }

    #[test]
    fn test_equipment_oversubscription() {
        let stock = vec![equipment("scoreboard", 1)];
        let mut first = active(window(10, 0, 11, 0));
        first.equipment_needed = vec![EquipmentNeed {
            name: "scoreboard".into(),
            quantity: 1,
        }];

        let mut prop = proposed(window(10, 30, 11, 30));
        prop.equipment_needed = vec![EquipmentNeed {
            name: "scoreboard".into(),
            quantity: 1,
        }];

        // 在庫 1 台が重なっている予約に割り当て済みなので不足する
        let result = detect(&prop, &[first], &stock, None, now());
        assert!(result
            .iter()
            .any(|c| c.conflict_type == ConflictType::ResourceConflict));

        // 重ならない時間帯なら在庫は足りる
        let mut prop = proposed(window(12, 0, 13, 0));
        prop.equipment_needed = vec![EquipmentNeed {
            name: "scoreboard".into(),
            quantity: 1,
        }];
        let result = detect(&prop, &[], &stock, None, now());
        assert!(result.is_empty());
    }

    #[test]
    fn test_out_of_order_equipment_not_counted() {
        let mut broken = equipment("scoreboard", 1);
        broken.condition = EquipmentCondition::OutOfOrder;

        let mut prop = proposed(window(10, 0, 11, 0));
        prop.equipment_needed = vec![EquipmentNeed {
            name: "scoreboard".into(),
            quantity: 1,
        }];
        let result = detect(&prop, &[], &[broken], None, now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].conflict_type, ConflictType::ResourceConflict);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut prop = proposed(window(10, 0, 11, 0));
        prop.attendee_count = Some(40);
        let result = detect(&prop, &[], &[], Some(30), now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].conflict_type, ConflictType::CapacityExceeded);

        prop.attendee_count = Some(30);
        assert!(detect(&prop, &[], &[], Some(30), now()).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let existing = vec![active(window(10, 0, 11, 0)), active(window(10, 45, 12, 0))];
        let prop = proposed(window(10, 30, 11, 30));
        let first = detect(&prop, &existing, &[], None, now());
        let second = detect(&prop, &existing, &[], None, now());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}

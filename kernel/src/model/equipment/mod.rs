use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::id::{EquipmentId, FacilityId};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "equipment_condition", rename_all = "snake_case")]
pub enum EquipmentCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    OutOfOrder,
}

#[derive(Debug, Clone)]
pub struct FacilityEquipment {
    pub equipment_id: EquipmentId,
    pub facility_id: FacilityId,
    pub equipment_name: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub condition: EquipmentCondition,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub is_available: bool,
}

impl FacilityEquipment {
    // 予約に割り当て可能な在庫として数えてよいか
    pub fn is_usable(&self) -> bool {
        self.is_available && self.condition != EquipmentCondition::OutOfOrder
    }
}

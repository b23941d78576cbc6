use chrono::NaiveDate;
use kernel::model::{
    equipment::{EquipmentCondition, FacilityEquipment},
    id::{EquipmentId, FacilityId},
};

#[derive(sqlx::FromRow)]
pub struct EquipmentRow {
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

impl From<EquipmentRow> for FacilityEquipment {
    fn from(value: EquipmentRow) -> Self {
        let EquipmentRow {
            equipment_id,
            facility_id,
            equipment_name,
            category,
            quantity,
            condition,
            last_maintenance_date,
            next_maintenance_date,
            is_available,
        } = value;
        FacilityEquipment {
            equipment_id,
            facility_id,
            equipment_name,
            category,
            quantity,
            condition,
            last_maintenance_date,
            next_maintenance_date,
            is_available,
        }
    }
}

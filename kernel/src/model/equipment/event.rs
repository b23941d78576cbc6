use chrono::NaiveDate;

use crate::model::{
    equipment::EquipmentCondition,
    id::{EquipmentId, FacilityId, UserId},
};

pub struct CreateEquipment {
    pub facility_id: FacilityId,
    pub equipment_name: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub condition: EquipmentCondition,
}

#[derive(Debug)]
pub struct UpdateEquipmentCondition {
    pub equipment_id: EquipmentId,
    pub facility_id: FacilityId,
    pub condition: EquipmentCondition,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub requested_user: UserId,
}

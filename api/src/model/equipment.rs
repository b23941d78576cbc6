use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipmentCondition},
        EquipmentCondition, FacilityEquipment,
    },
    id::{EquipmentId, FacilityId, UserId},
};

fn default_quantity() -> i32 {
    1
}

fn default_condition() -> EquipmentCondition {
    EquipmentCondition::Good
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    #[garde(length(min = 1))]
    pub equipment_name: String,
    #[garde(skip)]
    pub category: Option<String>,
    #[serde(default = "default_quantity")]
    #[garde(range(min = 1))]
    pub quantity: i32,
    #[serde(default = "default_condition")]
    #[garde(skip)]
    pub condition: EquipmentCondition,
}

#[derive(new)]
pub struct CreateEquipmentRequestWithId(FacilityId, CreateEquipmentRequest);

impl From<CreateEquipmentRequestWithId> for CreateEquipment {
    fn from(value: CreateEquipmentRequestWithId) -> Self {
        let CreateEquipmentRequestWithId(
            facility_id,
            CreateEquipmentRequest {
                equipment_name,
                category,
                quantity,
                condition,
            },
        ) = value;
        CreateEquipment {
            facility_id,
            equipment_name,
            category,
            quantity,
            condition,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentConditionRequest {
    #[garde(skip)]
    pub condition: EquipmentCondition,
    #[garde(skip)]
    pub last_maintenance_date: Option<NaiveDate>,
    #[garde(skip)]
    pub next_maintenance_date: Option<NaiveDate>,
}

#[derive(new)]
pub struct UpdateEquipmentConditionRequestWithIds(
    EquipmentId,
    FacilityId,
    UserId,
    UpdateEquipmentConditionRequest,
);

impl From<UpdateEquipmentConditionRequestWithIds> for UpdateEquipmentCondition {
    fn from(value: UpdateEquipmentConditionRequestWithIds) -> Self {
        let UpdateEquipmentConditionRequestWithIds(
            equipment_id,
            facility_id,
            requested_user,
            UpdateEquipmentConditionRequest {
                condition,
                last_maintenance_date,
                next_maintenance_date,
            },
        ) = value;
        UpdateEquipmentCondition {
            equipment_id,
            facility_id,
            condition,
            last_maintenance_date,
            next_maintenance_date,
            requested_user,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
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

impl From<FacilityEquipment> for EquipmentResponse {
    fn from(value: FacilityEquipment) -> Self {
        let FacilityEquipment {
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
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentListResponse {
    pub items: Vec<EquipmentResponse>,
}

impl From<Vec<FacilityEquipment>> for EquipmentListResponse {
    fn from(value: Vec<FacilityEquipment>) -> Self {
        Self {
            items: value.into_iter().map(EquipmentResponse::from).collect(),
        }
    }
}

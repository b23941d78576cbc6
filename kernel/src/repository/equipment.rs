use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipmentCondition},
        FacilityEquipment,
    },
    id::{EquipmentId, FacilityId},
};

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, event: CreateEquipment) -> AppResult<EquipmentId>;
    async fn find_by_facility_id(&self, facility_id: FacilityId)
        -> AppResult<Vec<FacilityEquipment>>;
    async fn update_condition(&self, event: UpdateEquipmentCondition) -> AppResult<()>;
}

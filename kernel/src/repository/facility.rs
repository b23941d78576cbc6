use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    facility::{
        event::{CreateFacility, DeactivateFacility, UpdateFacility},
        Facility,
    },
    id::FacilityId,
};

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId>;
    async fn find_all(&self) -> AppResult<Vec<Facility>>;
    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>>;
    async fn update(&self, event: UpdateFacility) -> AppResult<()>;
    // 施設は物理削除せず is_active を落とすだけにする
    async fn deactivate(&self, event: DeactivateFacility) -> AppResult<()>;
}

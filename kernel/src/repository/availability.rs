use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    availability::{
        event::{CreateAvailabilityRule, CreateUnavailability, DeleteUnavailability},
        AvailabilityRule, AvailabilitySchedule, UnavailabilityWindow,
    },
    id::{AvailabilityId, FacilityId, UnavailabilityId},
};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create_rule(&self, event: CreateAvailabilityRule) -> AppResult<AvailabilityId>;
    async fn find_rules_by_facility_id(
        &self,
        facility_id: FacilityId,
    ) -> AppResult<Vec<AvailabilityRule>>;
    async fn create_unavailability(
        &self,
        event: CreateUnavailability,
    ) -> AppResult<UnavailabilityId>;
    async fn find_unavailability_by_facility_id(
        &self,
        facility_id: FacilityId,
    ) -> AppResult<Vec<UnavailabilityWindow>>;
    async fn delete_unavailability(&self, event: DeleteUnavailability) -> AppResult<()>;
    // 施設のルールとブラックアウトをまとめて取得する
    async fn load_schedule(&self, facility_id: FacilityId) -> AppResult<AvailabilitySchedule>;
}

use rust_decimal::Decimal;

use crate::model::id::{FacilityId, UserId};

pub struct CreateFacility {
    pub facility_name: String,
    pub facility_type: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub amenities: Vec<String>,
}

#[derive(Debug)]
pub struct UpdateFacility {
    pub facility_id: FacilityId,
    pub facility_name: Option<String>,
    pub facility_type: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub amenities: Option<Vec<String>>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeactivateFacility {
    pub facility_id: FacilityId,
    pub requested_user: UserId,
}

use rust_decimal::Decimal;

use crate::model::id::FacilityId;

pub mod event;

#[derive(Debug, Clone)]
pub struct Facility {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub amenities: Vec<String>,
    pub is_active: bool,
}

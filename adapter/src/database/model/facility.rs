use kernel::model::{facility::Facility, id::FacilityId};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub amenities: Vec<String>,
    pub is_active: bool,
}

impl From<FacilityRow> for Facility {
    fn from(value: FacilityRow) -> Self {
        let FacilityRow {
            facility_id,
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
            is_active,
        } = value;
        Facility {
            facility_id,
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
            is_active,
        }
    }
}

use derive_new::new;
use garde::Validate;
use kernel::model::{
    facility::{
        event::{CreateFacility, UpdateFacility},
        Facility,
    },
    id::{FacilityId, UserId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    #[garde(length(min = 1))]
    pub facility_name: String,
    #[garde(length(min = 1))]
    pub facility_type: String,
    #[garde(skip)]
    pub address: Option<String>,
    #[garde(skip)]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub hourly_rate: Option<Decimal>,
    #[serde(default)]
    #[garde(skip)]
    pub amenities: Vec<String>,
}

impl From<CreateFacilityRequest> for CreateFacility {
    fn from(value: CreateFacilityRequest) -> Self {
        let CreateFacilityRequest {
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
        } = value;
        CreateFacility {
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacilityRequest {
    #[garde(skip)]
    pub facility_name: Option<String>,
    #[garde(skip)]
    pub facility_type: Option<String>,
    #[garde(skip)]
    pub address: Option<String>,
    #[garde(skip)]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub hourly_rate: Option<Decimal>,
    #[garde(skip)]
    pub amenities: Option<Vec<String>>,
}

#[derive(new)]
pub struct UpdateFacilityRequestWithIds(FacilityId, UserId, UpdateFacilityRequest);

impl From<UpdateFacilityRequestWithIds> for UpdateFacility {
    fn from(value: UpdateFacilityRequestWithIds) -> Self {
        let UpdateFacilityRequestWithIds(
            facility_id,
            requested_user,
            UpdateFacilityRequest {
                facility_name,
                facility_type,
                address,
                capacity,
                hourly_rate,
                amenities,
            },
        ) = value;
        UpdateFacility {
            facility_id,
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
            requested_user,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub facility_type: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub hourly_rate: Option<Decimal>,
    pub amenities: Vec<String>,
    pub is_active: bool,
}

impl From<Facility> for FacilityResponse {
    fn from(value: Facility) -> Self {
        let Facility {
            facility_id,
            facility_name,
            facility_type,
            address,
            capacity,
            hourly_rate,
            amenities,
            is_active,
        } = value;
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitiesResponse {
    pub items: Vec<FacilityResponse>,
}

impl From<Vec<Facility>> for FacilitiesResponse {
    fn from(value: Vec<Facility>) -> Self {
        Self {
            items: value.into_iter().map(FacilityResponse::from).collect(),
        }
    }
}

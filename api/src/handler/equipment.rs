use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use serde_json::json;

use kernel::model::id::{EquipmentId, FacilityId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::equipment::{
        CreateEquipmentRequest, CreateEquipmentRequestWithId, EquipmentListResponse,
        UpdateEquipmentConditionRequest, UpdateEquipmentConditionRequestWithIds,
    },
};

pub async fn register_equipment(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let event = CreateEquipmentRequestWithId::new(facility_id, req);
    let equipment_id = registry.equipment_repository().create(event.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "equipmentId": equipment_id })),
    ))
}

pub async fn show_equipment_list(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentListResponse>> {
    registry
        .equipment_repository()
        .find_by_facility_id(facility_id)
        .await
        .map(EquipmentListResponse::from)
        .map(Json)
}

pub async fn update_equipment_condition(
    user: AuthorizedUser,
    Path((facility_id, equipment_id)): Path<(FacilityId, EquipmentId)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEquipmentConditionRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let event =
        UpdateEquipmentConditionRequestWithIds::new(equipment_id, facility_id, user.id(), req);
    registry
        .equipment_repository()
        .update_condition(event.into())
        .await
        .map(|_| StatusCode::OK)
}

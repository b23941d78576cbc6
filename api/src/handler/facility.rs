use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use serde_json::json;

use kernel::model::{facility::event::DeactivateFacility, id::FacilityId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::facility::{
        CreateFacilityRequest, FacilitiesResponse, FacilityResponse, UpdateFacilityRequest,
        UpdateFacilityRequestWithIds,
    },
};

// 施設の登録・変更・停止は管理者のみが行える
pub async fn register_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFacilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let facility_id = registry.facility_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "facilityId": facility_id })),
    ))
}

pub async fn show_facility_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilitiesResponse>> {
    registry
        .facility_repository()
        .find_all()
        .await
        .map(FacilitiesResponse::from)
        .map(Json)
}

pub async fn show_facility(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilityResponse>> {
    registry
        .facility_repository()
        .find_by_id(facility_id)
        .await
        .and_then(|f| match f {
            Some(f) => Ok(Json(f.into())),
            None => Err(AppError::EntityNotFound("facility not found".into())),
        })
}

pub async fn update_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateFacilityRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_facility = UpdateFacilityRequestWithIds::new(facility_id, user.id(), req);
    registry
        .facility_repository()
        .update(update_facility.into())
        .await
        .map(|_| StatusCode::OK)
}

// 予約から参照されるため施設は物理削除しない
pub async fn deactivate_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let deactivate_facility = DeactivateFacility {
        facility_id,
        requested_user: user.id(),
    };
    registry
        .facility_repository()
        .deactivate(deactivate_facility)
        .await
        .map(|_| StatusCode::OK)
}

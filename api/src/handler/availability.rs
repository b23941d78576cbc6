use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use garde::Validate;
use serde_json::json;

use kernel::model::{
    availability::event::DeleteUnavailability,
    booking::BookingWindow,
    id::{FacilityId, UnavailabilityId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::availability::{
        AvailabilityCheckQuery, AvailabilityCheckResponse, AvailabilityRulesResponse,
        CreateAvailabilityRuleRequest, CreateAvailabilityRuleRequestWithId,
        CreateUnavailabilityRequest, CreateUnavailabilityRequestWithIds,
        UnavailabilityListResponse,
    },
};

pub async fn register_availability_rule(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateAvailabilityRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;
    if req.start_time >= req.end_time {
        return Err(AppError::UnprocessableEntity(
            "startTime must be earlier than endTime".into(),
        ));
    }
    if req.minimum_booking_duration > req.maximum_booking_duration {
        return Err(AppError::UnprocessableEntity(
            "minimumBookingDuration must not exceed maximumBookingDuration".into(),
        ));
    }

    let event = CreateAvailabilityRuleRequestWithId::new(facility_id, req);
    let availability_id = registry
        .availability_repository()
        .create_rule(event.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "availabilityId": availability_id })),
    ))
}

pub async fn show_availability_rules(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityRulesResponse>> {
    registry
        .availability_repository()
        .find_rules_by_facility_id(facility_id)
        .await
        .map(AvailabilityRulesResponse::from)
        .map(Json)
}

// 候補時間帯が予約可能かどうかだけを返す。何も書き込まない
pub async fn check_availability(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    Query(query): Query<AvailabilityCheckQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityCheckResponse>> {
    if query.start_time >= query.end_time {
        return Err(AppError::UnprocessableEntity(
            "startTime must be earlier than endTime".into(),
        ));
    }

    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?;
    if facility.is_none() {
        return Err(AppError::EntityNotFound("facility not found".into()));
    }

    let schedule = registry
        .availability_repository()
        .load_schedule(facility_id)
        .await?;
    let window = BookingWindow::new(query.start_time, query.end_time);

    let response = match schedule.resolve(&window, Utc::now()) {
        Ok(()) => AvailabilityCheckResponse {
            available: true,
            reason: None,
        },
        Err(reason) => AvailabilityCheckResponse {
            available: false,
            reason: Some(reason.to_string()),
        },
    };

    Ok(Json(response))
}

pub async fn register_unavailability(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUnavailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;
    if req.start_time >= req.end_time {
        return Err(AppError::UnprocessableEntity(
            "startTime must be earlier than endTime".into(),
        ));
    }
    // 週次繰り返しのブラックアウトは日をまたげない
    if req.is_recurring && req.start_time.date_naive() != req.end_time.date_naive() {
        return Err(AppError::UnprocessableEntity(
            "recurring blackout must start and end on the same day".into(),
        ));
    }

    let event = CreateUnavailabilityRequestWithIds::new(facility_id, user.id(), req);
    let unavailability_id = registry
        .availability_repository()
        .create_unavailability(event.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "unavailabilityId": unavailability_id })),
    ))
}

pub async fn show_unavailability(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UnavailabilityListResponse>> {
    registry
        .availability_repository()
        .find_unavailability_by_facility_id(facility_id)
        .await
        .map(UnavailabilityListResponse::from)
        .map(Json)
}

pub async fn delete_unavailability(
    user: AuthorizedUser,
    Path((facility_id, unavailability_id)): Path<(FacilityId, UnavailabilityId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let event = DeleteUnavailability {
        unavailability_id,
        facility_id,
        requested_user: user.id(),
    };
    registry
        .availability_repository()
        .delete_unavailability(event)
        .await
        .map(|_| StatusCode::OK)
}

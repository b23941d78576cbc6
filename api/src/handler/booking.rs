use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use garde::Validate;

use kernel::model::{
    booking::{
        event::{CancelBooking, CheckInBooking, CheckOutBooking, CompleteBooking, ConfirmBooking},
        BookingWindow,
    },
    id::{BookingId, FacilityId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        booking::{
            BookingListQuery, BookingResponse, BookingsResponse, CreateBookingRequest,
            CreateBookingRequestWithIds, CreatedBookingResponse, RescheduleBookingRequest,
            RescheduleBookingRequestWithIds,
        },
        booking_update::BookingUpdatesResponse,
        conflict::ConflictsResponse,
    },
};

fn validate_window(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> AppResult<()> {
    if start >= end {
        return Err(AppError::UnprocessableEntity(
            "startTime must be earlier than endTime".into(),
        ));
    }
    if start <= Utc::now() {
        return Err(AppError::UnprocessableEntity(
            "startTime must be in the future".into(),
        ));
    }
    Ok(())
}

// 予約を作成する。検出された競合はエラーではなく
// レスポンスに警告として載せて返す
pub async fn book_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;
    validate_window(req.start_time, req.end_time)?;

    let event = CreateBookingRequestWithIds::new(facility_id, user.id(), req);
    let created = registry.booking_repository().create(event.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedBookingResponse::from(created)),
    ))
}

pub async fn show_facility_bookings(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    let range = match (query.from, query.to) {
        (Some(from), Some(to)) if from < to => Some(BookingWindow::new(from, to)),
        (Some(_), Some(_)) => {
            return Err(AppError::UnprocessableEntity(
                "from must be earlier than to".into(),
            ))
        }
        _ => None,
    };

    registry
        .booking_repository()
        .find_by_facility_id(facility_id, range)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_booking(
    _user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await
        .and_then(|b| match b {
            Some(b) => Ok(Json(b.into())),
            None => Err(AppError::EntityNotFound("booking not found".into())),
        })
}

pub async fn reschedule_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<RescheduleBookingRequest>,
) -> AppResult<Json<CreatedBookingResponse>> {
    req.validate(&())?;
    validate_window(req.start_time, req.end_time)?;

    let event = RescheduleBookingRequestWithIds::new(booking_id, user.id(), req);
    registry
        .booking_repository()
        .reschedule(event.into())
        .await
        .map(CreatedBookingResponse::from)
        .map(Json)
}

pub async fn confirm_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .confirm(ConfirmBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .cancel(CancelBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn complete_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .complete(CompleteBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn check_in_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .check_in(CheckInBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn check_out_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_repository()
        .check_out(CheckOutBooking::new(booking_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_booking_conflicts(
    _user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ConflictsResponse>> {
    registry
        .conflict_repository()
        .find_by_booking_id(booking_id)
        .await
        .map(ConflictsResponse::from)
        .map(Json)
}

pub async fn show_booking_updates(
    _user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingUpdatesResponse>> {
    registry
        .booking_update_repository()
        .find_by_booking_id(booking_id)
        .await
        .map(BookingUpdatesResponse::from)
        .map(Json)
}

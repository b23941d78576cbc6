use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;

use kernel::model::{conflict::event::ResolveConflict, id::ConflictId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::conflict::{ConflictsResponse, ResolveConflictRequest},
};

pub async fn show_unresolved_conflicts(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ConflictsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .conflict_repository()
        .find_unresolved_all()
        .await
        .map(ConflictsResponse::from)
        .map(Json)
}

pub async fn resolve_conflict(
    user: AuthorizedUser,
    Path(conflict_id): Path<ConflictId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ResolveConflictRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    registry
        .conflict_repository()
        .resolve(ResolveConflict::new(conflict_id, user.id(), req.resolution))
        .await
        .map(|_| StatusCode::OK)
}

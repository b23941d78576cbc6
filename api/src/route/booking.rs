use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    booking::{
        cancel_booking, check_in_booking, check_out_booking, complete_booking, confirm_booking,
        reschedule_booking, show_booking, show_booking_conflicts, show_booking_updates,
        show_my_bookings,
    },
    conflict::{resolve_conflict, show_unresolved_conflicts},
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_my_bookings))
        .route("/:booking_id", get(show_booking).put(reschedule_booking))
        .route("/:booking_id/confirm", post(confirm_booking))
        .route("/:booking_id/cancel", post(cancel_booking))
        .route("/:booking_id/complete", post(complete_booking))
        .route("/:booking_id/check-in", post(check_in_booking))
        .route("/:booking_id/check-out", post(check_out_booking))
        .route("/:booking_id/conflicts", get(show_booking_conflicts))
        .route("/:booking_id/updates", get(show_booking_updates));

    let conflict_routers = Router::new()
        .route("/", get(show_unresolved_conflicts))
        .route("/:conflict_id/resolve", post(resolve_conflict));

    Router::new()
        .nest("/bookings", booking_routers)
        .nest("/conflicts", conflict_routers)
}

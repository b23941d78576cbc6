use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    availability::{
        check_availability, delete_unavailability, register_availability_rule,
        register_unavailability, show_availability_rules, show_unavailability,
    },
    booking::{book_facility, show_facility_bookings},
    equipment::{register_equipment, show_equipment_list, update_equipment_condition},
    facility::{
        deactivate_facility, register_facility, show_facility, show_facility_list, update_facility,
    },
};

pub fn build_facility_routers() -> Router<AppRegistry> {
    let facility_routers = Router::new()
        .route("/", post(register_facility).get(show_facility_list))
        .route(
            "/:facility_id",
            get(show_facility)
                .put(update_facility)
                .delete(deactivate_facility),
        )
        .route(
            "/:facility_id/availability",
            post(register_availability_rule).get(show_availability_rules),
        )
        .route("/:facility_id/availability/check", get(check_availability))
        .route(
            "/:facility_id/unavailability",
            post(register_unavailability).get(show_unavailability),
        )
        .route(
            "/:facility_id/unavailability/:unavailability_id",
            delete(delete_unavailability),
        )
        .route(
            "/:facility_id/equipment",
            post(register_equipment).get(show_equipment_list),
        )
        .route(
            "/:facility_id/equipment/:equipment_id",
            put(update_equipment_condition),
        )
        .route(
            "/:facility_id/bookings",
            post(book_facility).get(show_facility_bookings),
        );

    Router::new().nest("/facilities", facility_routers)
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub const RESERVATIONS_PATH: &str = "/api/v1/reservations";

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/v1/reservations",
            post(handlers::reservation::create_reservation),
        )
        .route(
            "/api/v1/reservations/:id",
            get(handlers::reservation::get_reservation)
                .patch(handlers::reservation::update_reservation)
                .delete(handlers::reservation::delete_reservation),
        )
        .route(
            "/api/v1/reservations/room/:room_id",
            get(handlers::reservation::list_room_reservations),
        )
}

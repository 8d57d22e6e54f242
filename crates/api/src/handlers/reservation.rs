//! # Reservation Handlers
//!
//! HTTP entry points for the reservation lifecycle. Each handler decodes its input,
//! runs validation, calls the store under the configured deadline and leaves the
//! mapping of failures to [`AppError`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use roombook_core::{
    deadline::with_deadline,
    models::request::{
        CreateReservationRequest, CreateReservationResponse, ReservationResponse,
        UpdateReservationRequest,
    },
};
use std::sync::Arc;

use crate::{
    middleware::error_handling::AppError, response::Envelope,
    routes::reservation::RESERVATIONS_PATH, ApiState,
};

/// Books a room.
///
/// Responds `201 Created` with a `Location` header pointing at the new reservation,
/// `400` when the request is invalid and `409` when the window is already taken.
#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(AppError::from_rejection)?;

    let reservation = request
        .validate()
        .map_err(|err| AppError::with_data(err, &request))?;

    let id = with_deadline(state.request_timeout, state.repo.create(reservation)).await?;

    let location = format!("{RESERVATIONS_PATH}/{id}");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Envelope::ok(CreateReservationResponse { id })),
    )
        .into_response())
}

#[axum::debug_handler]
pub async fn get_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ReservationResponse>>, AppError> {
    let reservation = with_deadline(state.request_timeout, state.repo.get(&id)).await?;

    Ok(Json(Envelope::ok(ReservationResponse::from(reservation))))
}

/// Lists a room's reservations; a room without any answers `204 No Content`.
#[axum::debug_handler]
pub async fn list_room_reservations(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Envelope<Vec<ReservationResponse>>>, AppError> {
    let reservations = with_deadline(state.request_timeout, state.repo.list(&room_id)).await?;

    Ok(Json(Envelope::ok(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    )))
}

/// Applies a sparse update. Fields missing from the body keep their stored value.
#[axum::debug_handler]
pub async fn update_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateReservationRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(AppError::from_rejection)?;

    let patch = request
        .validate()
        .map_err(|err| AppError::with_data(err, &request))?;

    with_deadline(state.request_timeout, state.repo.update(&id, patch)).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_reservation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    with_deadline(state.request_timeout, state.repo.delete(&id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pretty_assertions::assert_eq;
use roombook_api::middleware::error_handling::{map_error, AppError};
use roombook_core::errors::BookingError;
use rstest::rstest;
use serde_json::{json, Value};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

#[rstest]
#[case::validation(BookingError::validation("room_id is required"), StatusCode::BAD_REQUEST)]
#[case::conflict(BookingError::Conflict, StatusCode::CONFLICT)]
#[case::not_found(BookingError::NotFound("abc".to_string()), StatusCode::NOT_FOUND)]
#[case::empty_room(BookingError::NotFoundForRoom("1".to_string()), StatusCode::NO_CONTENT)]
#[case::cancelled(BookingError::Cancelled("deadline".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::database(BookingError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_conflict_and_empty_room_have_no_body() {
    for error in [
        BookingError::Conflict,
        BookingError::NotFoundForRoom("1".to_string()),
    ] {
        let response = map_error(error);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn test_validation_message_is_echoed_without_prefix() {
    let response = AppError::with_data(
        BookingError::validation("no fields to update"),
        &json!({ "room_id": "" }),
    )
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "success": false,
            "message": "no fields to update",
            "data": { "room_id": "" },
        })
    );
}

#[tokio::test]
async fn test_server_errors_carry_only_the_message() {
    let response = map_error(BookingError::Cancelled(
        "timed out waiting for a database connection".to_string(),
    ));

    assert_eq!(
        body_json(response).await,
        json!({
            "success": false,
            "message": "Operation cancelled: timed out waiting for a database connection",
        })
    );
}

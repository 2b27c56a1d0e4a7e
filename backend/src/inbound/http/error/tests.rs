//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;

async fn body_of(error: &DomainError) -> (StatusCode, ErrorBody) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds");
    (status, body)
}

#[rstest]
#[case(DomainError::bad_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: DomainError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case(DomainError::bad_request(messages::INVALID_CARD_ID))]
#[case(DomainError::not_found(messages::USER_NOT_FOUND))]
#[actix_web::test]
async fn client_errors_keep_their_message(#[case] error: DomainError) {
    let (_, body) = body_of(&error).await;
    assert_eq!(body.message, error.message());
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = DomainError::internal("user repository error: connection reset by peer");

    let (status, body) = body_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.message, messages::SERVER_ERROR);
}

#[actix_web::test]
async fn body_has_only_a_message_field() {
    let response = ResponseError::error_response(&DomainError::not_found(messages::RESOURCE_NOT_FOUND));
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

    assert_eq!(value, serde_json::json!({ "message": "Ресурс не найден" }));
}

#[actix_web::test]
async fn not_found_fallback_reports_missing_resource() {
    let error = not_found().await.expect_err("fallback always fails");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), messages::RESOURCE_NOT_FOUND);
}

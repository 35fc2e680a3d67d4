//! Tests for rendering domain errors as responses.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn trace_id() -> String {
    "00000000-0000-0000-0000-000000000000".to_owned()
}

async fn render(err: &Error) -> (StatusCode, Option<String>, Value) {
    let response = err.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("text is required"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("post already liked"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no token, authorization denied"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("user is not authorized"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("post not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("store offline"), StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_has_its_status(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(err.status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_hide_message_and_details(trace_id: String) {
    let err = Error::internal("bcrypt worker panicked")
        .with_trace_id(trace_id.clone())
        .with_details(json!({"cost": 10}));

    let (status, header, body) = render(&err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(trace_id.as_str()));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": trace_id
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_details(trace_id: String) {
    let err = Error::invalid_request("status is required")
        .with_trace_id(trace_id)
        .with_details(json!({"field": "status", "code": "missing_field"}));

    let (status, _, body) = render(&err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "status is required");
    assert_eq!(body["details"]["field"], "status");
}

#[rstest]
#[actix_web::test]
async fn untraced_errors_send_no_header() {
    let err = Error::conflict("User already exists");

    let (_, header, body) = render(&err).await;

    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn public_body_only_rewrites_internal_errors() {
    let denied = Error::forbidden("user is not authorized");
    assert_eq!(public_body(&denied), denied);
    assert_eq!(
        public_body(&Error::internal("lock poisoned")).message(),
        REDACTED_MESSAGE
    );
}

#[rstest]
fn framework_errors_become_internal() {
    let err: Error = actix_web::error::ErrorPayloadTooLarge("too big").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}

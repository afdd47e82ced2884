//! JSON envelope shared by every API response.
//!
//! Success: `{"code": 200, "data": ...}`.
//! Failure: `{"code": <status>, "error": <reason>, "data": []}`; `data` is never null.

use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::application::error::ErrorReport;

const EMPTY_DATA: &[Value] = &[];

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            error: None,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Failed API call. The HTTP status and the envelope `code` always agree.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    report: ErrorReport,
}

impl ApiError {
    pub fn internal(source: &'static str, error: &dyn StdError) -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        Self {
            status,
            report: ErrorReport::from_error(source, status, error),
        }
    }

    pub fn not_found(source: &'static str, detail: impl Into<String>) -> Self {
        Self::client(StatusCode::NOT_FOUND, source, detail)
    }

    pub fn bad_request(source: &'static str, detail: impl Into<String>) -> Self {
        Self::client(StatusCode::BAD_REQUEST, source, detail)
    }

    pub fn method_not_allowed(source: &'static str, detail: impl Into<String>) -> Self {
        Self::client(StatusCode::METHOD_NOT_ALLOWED, source, detail)
    }

    fn client(status: StatusCode, source: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            report: ErrorReport::from_message(source, status, detail),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn reason(&self) -> &'static str {
        self.status
            .canonical_reason()
            .unwrap_or("Internal Server Error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope {
            code: self.status.as_u16(),
            error: Some(self.reason()),
            data: EMPTY_DATA,
        };
        let mut response = (self.status, Json(body)).into_response();
        // Picked up by `log_responses`; never serialized to the client.
        self.report.attach(&mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn success_envelope_omits_error() {
        let response = Envelope::ok(vec!["a", "b"]).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "code": 200, "data": ["a", "b"] }));
    }

    #[tokio::test]
    async fn internal_error_has_empty_data_and_report() {
        let io = std::io::Error::other("disk gone");
        let response = ApiError::internal("tests", &io).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .cloned()
            .expect("report attached");
        assert_eq!(report.messages, ["disk gone".to_string()]);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "code": 500, "error": "Internal Server Error", "data": [] })
        );
    }

    #[tokio::test]
    async fn client_errors_carry_their_reason() {
        let response = ApiError::bad_request("tests", "bad id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "code": 400, "error": "Bad Request", "data": [] })
        );

        let response = ApiError::method_not_allowed("tests", "POST /api/tag").into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "code": 405, "error": "Method Not Allowed", "data": [] })
        );
    }

    #[tokio::test]
    async fn not_found_uses_matching_code() {
        let response = ApiError::not_found("tests", "no content `x`").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "code": 404, "error": "Not Found", "data": [] })
        );
    }
}

//! Content API handlers.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{
    HttpState,
    envelope::{ApiError, Envelope},
};

/// `GET /api/tag`: every tag with its records, largest group first.
pub async fn list_tag_groups(State(state): State<HttpState>) -> Result<Response, ApiError> {
    let groups = state
        .content
        .tag_groups()
        .await
        .map_err(|err| ApiError::internal("infra::http::api::list_tag_groups", &err))?;

    Ok(Envelope::ok(groups.as_slice()).into_response())
}

/// `GET /api/content`: every record in source order.
pub async fn list_contents(State(state): State<HttpState>) -> Result<Response, ApiError> {
    let records = state
        .content
        .contents()
        .await
        .map_err(|err| ApiError::internal("infra::http::api::list_contents", &err))?;

    Ok(Envelope::ok(records.as_slice()).into_response())
}

/// `GET /api/content/{content_id}`: one record, or a 404 envelope.
pub async fn get_content(
    State(state): State<HttpState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(content_id) = path.map_err(|rejection| {
        ApiError::bad_request("infra::http::api::get_content", rejection.body_text())
    })?;

    let record = state
        .content
        .get_content(&content_id)
        .await
        .map_err(|err| ApiError::internal("infra::http::api::get_content", &err))?;

    match record {
        Some(record) => Ok(Envelope::ok(record).into_response()),
        None => Err(ApiError::not_found(
            "infra::http::api::get_content",
            format!("no content with id `{content_id}`"),
        )),
    }
}

pub async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(
        "infra::http::api::fallback",
        format!("no route for `{}`", uri.path()),
    )
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(
        "infra::http::api::method_not_allowed",
        format!("`{method}` is not allowed on `{}`", uri.path()),
    )
}

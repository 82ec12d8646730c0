//! Common responses for the API shared by all the contexts.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize, Debug)]
struct InternalServerErrorBody<'a> {
    message: &'a str,
    error_id: String,
}

/// `401` response returned for every authentication failure.
///
/// Missing header, malformed header and rejected tokens are deliberately
/// indistinguishable: the reason a credential failed is logged server-side
/// only.
#[must_use]
pub fn unauthorized_response() -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: "unauthorized" })).into_response()
}

/// `500` response with a correlation identifier.
///
/// The caller gets a generic message plus the `error_id`; the original error
/// is logged server-side under the same identifier, so operators can match a
/// report to the log line without the internals ever leaving the process.
#[must_use]
pub fn internal_server_error_response(error_id: Uuid) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalServerErrorBody {
            message: "Internal server error while retrieving the conflict data.",
            error_id: error_id.to_string(),
        }),
    )
        .into_response()
}

//! API handlers for the [`events`](crate::servers::apis::v1::context::events)
//! API context.
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::error;
use uuid::Uuid;

use super::responses::events_response;
use crate::core::services::events::get_events_grouped_by_region;
use crate::core::Gateway;
use crate::servers::apis::v1::responses::internal_server_error_response;

/// It handles the request to get the conflict-event dataset grouped by
/// region.
///
/// Every failure below this boundary is converted into a `500` carrying a
/// correlation identifier; the gateway process never crashes on a request.
pub async fn get_events_handler(State(gateway): State<Arc<Gateway>>) -> Response {
    match get_events_grouped_by_region(&gateway).await {
        Ok(grouped) => events_response(grouped).into_response(),
        Err(error) => {
            let error_id = Uuid::new_v4();

            error!(%error_id, %error, "failed to retrieve the conflict events");

            internal_server_error_response(error_id)
        }
    }
}

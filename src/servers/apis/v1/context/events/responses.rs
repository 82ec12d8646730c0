//! API responses for the [`events`](crate::servers::apis::v1::context::events)
//! API context.
use axum::response::Json;
use conflict_gateway_primitives::GroupedByRegion;

/// `200` response: the region-grouped dataset as the JSON body.
pub fn events_response(grouped: GroupedByRegion) -> Json<GroupedByRegion> {
    Json(grouped)
}

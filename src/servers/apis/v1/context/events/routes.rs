//! API routes for the [`events`](crate::servers::apis::v1::context::events)
//! API context.
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use super::handlers::get_events_handler;
use crate::core::Gateway;

/// It adds the routes to the router for the events API context.
///
/// The route keeps the path the existing clients already consume.
pub fn add(router: Router, gateway: Arc<Gateway>) -> Router {
    router.route("/conflitti", get(get_events_handler).with_state(gateway))
}

//! Route initialization for the v1 API.
use std::sync::Arc;

use axum::Router;

use super::context::events;
use crate::core::Gateway;

/// Add the routes for the v1 API.
pub fn add(router: Router, gateway: Arc<Gateway>) -> Router {
    events::routes::add(router, gateway)
}

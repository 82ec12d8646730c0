//! Authentication middleware for the API.
//!
//! It uses the `Authorization` header to authenticate the caller. Requests
//! must carry a bearer token:
//!
//! `Authorization: Bearer <token>`
//!
//! The token is verified by the external identity provider configured in the
//! `[identity]` section of the configuration. On success the resolved
//! [`AuthenticatedIdentity`](crate::core::auth::AuthenticatedIdentity) is
//! attached to the request extensions so downstream handlers can read who
//! the caller is.
//!
//! This is a synchronous gate in front of every protected route: on any
//! failure the pipeline is short-circuited with a `401` and no downstream
//! component runs. All failures look the same to the caller; the reason is
//! only logged server-side.
use std::panic::Location;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::core::auth::{self, parse_bearer_token};
use crate::core::Gateway;
use crate::servers::apis::v1::responses::unauthorized_response;

/// Middleware for authentication using a bearer token in the
/// `Authorization` header.
pub async fn auth(State(gateway): State<Arc<Gateway>>, mut request: Request, next: Next) -> Response {
    let token = match bearer_token_from_header(&request) {
        Ok(token) => token,
        Err(err) => {
            debug!("authentication rejected: {err}");
            return unauthorized_response();
        }
    };

    match gateway.authenticate(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            debug!("authentication rejected: {err}");
            unauthorized_response()
        }
    }
}

fn bearer_token_from_header(request: &Request) -> Result<String, auth::Error> {
    let Some(header_value) = request.headers().get(header::AUTHORIZATION) else {
        return Err(auth::Error::MissingAuthorizationHeader {
            location: Location::caller(),
        });
    };

    let Ok(header_value) = header_value.to_str() else {
        return Err(auth::Error::MalformedAuthorizationHeader {
            location: Location::caller(),
        });
    };

    match parse_bearer_token(header_value) {
        Some(token) => Ok(token.to_owned()),
        None => Err(auth::Error::MalformedAuthorizationHeader {
            location: Location::caller(),
        }),
    }
}

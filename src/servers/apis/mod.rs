//! The gateway HTTP API.
//!
//! The API exposes the conflict-event dataset to trusted clients:
//!
//! - `GET /conflitti`: the dataset grouped by region. Protected by the
//!   bearer-token authentication middleware.
//! - `GET /health_check`: unauthenticated health check.
//!
//! Every protected route sits behind the
//! [`auth`](crate::servers::apis::v1::middlewares::auth) middleware: no
//! protected operation runs without a verified identity.
//!
//! # Authentication
//!
//! Requests carry an `Authorization: Bearer <token>` header. The token is
//! verified by the external identity provider configured in the
//! `[identity]` section; see
//! [`RemoteVerifier`](crate::core::auth::RemoteVerifier).
//!
//! Missing header, malformed header and rejected tokens are
//! indistinguishable to the caller:
//!
//! ```json
//! { "error": "unauthorized" }
//! ```
//!
//! # Versioning
//!
//! Handlers, responses and middlewares live under [`v1`]. The routes
//! themselves are unprefixed (`/conflitti`), matching the paths the existing
//! clients already consume.
pub mod routes;
pub mod server;
pub mod v1;

//! # motodesk-api
//!
//! HTTP surface of MotoDesk: actix-web handlers, the bearer-token
//! middleware, response DTOs and the route table. Business rules live in
//! `motodesk-core`; this crate translates between HTTP and the services.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::ApiError;
pub use middleware::BearerAuth;
pub use routes::configure;

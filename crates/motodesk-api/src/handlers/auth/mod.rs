//! Authentication handlers.
//!
//! ## Endpoints
//! - POST /api/auth/login - Authenticate and get a bearer token (public)
//! - POST /api/auth/logout - Revoke the presented token
//! - GET /api/auth/me - Current user info

pub mod models;

mod login;
mod logout;
mod me;

pub use login::login_handler;
pub use logout::logout_handler;
pub use me::me_handler;

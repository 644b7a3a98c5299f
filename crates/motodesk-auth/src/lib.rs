//! # motodesk-auth
//!
//! Authentication for MotoDesk: bcrypt password hashing with strength
//! validation, the login-account store, an in-process bearer-token session
//! map, and the login/lockout flow.
//!
//! Sessions are opaque tokens held in memory; there is no persistence or
//! rotation machinery, and a server restart logs everyone out.

pub mod error;
pub mod password;
pub mod service;
pub mod session_manager;
pub mod user_store;

pub use error::{AuthError, AuthResult};
pub use password::{hash_password, validate_password, verify_password};
pub use service::{AuthService, ADMIN_PASSWORD_ENV, DEFAULT_ADMIN_USERNAME};
pub use session_manager::{Session, SessionManager};
pub use user_store::{UserStore, USERS_PARTITION};

//! Auth request/response models.

mod login_request;
mod login_response;
mod user_info;

pub use login_request::LoginRequest;
pub use login_response::LoginResponse;
pub use user_info::UserInfo;

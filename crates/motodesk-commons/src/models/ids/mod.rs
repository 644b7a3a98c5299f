//! Type-safe identifier wrappers.
//!
//! One newtype per identifier so the compiler catches a `CustomerId` handed
//! to a function expecting a `JobCardId`. All identifiers are generated with
//! NanoID (21 URL-safe characters) and stored as raw UTF-8 bytes.

mod bay_id;
mod customer_id;
mod job_card_id;
mod part_id;
mod redemption_id;
mod reward_id;
mod staff_id;
mod user_id;

pub use bay_id::BayId;
pub use customer_id::CustomerId;
pub use job_card_id::JobCardId;
pub use part_id::PartId;
pub use redemption_id::RedemptionId;
pub use reward_id::RewardId;
pub use staff_id::StaffId;
pub use user_id::{UserId, UserIdValidationError};

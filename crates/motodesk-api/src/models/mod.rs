//! Response DTOs shared across handlers.

mod job_card_response;

pub use job_card_response::{JobCardResponse, LineItemResponse};

//! # motodesk-core
//!
//! Domain services for MotoDesk: job cards and their workflow + audit
//! trail, bay assignment, staff attendance, the loyalty program, the parts
//! catalog and reporting.
//!
//! Services validate and enforce invariants; HTTP concerns (status codes,
//! DTOs, role gates) live in motodesk-api, and persistence primitives in
//! motodesk-store. `AppContext` wires everything over one backend.

pub mod app_context;
pub mod error;
pub mod services;

pub use app_context::{AppContext, ALL_PARTITIONS};
pub use error::{ServiceError, ServiceResult};

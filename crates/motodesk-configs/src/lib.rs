//! motodesk-configs
//!
//! Server configuration types and loader for MotoDesk.

pub mod config;

pub use config::defaults;
pub use config::*;

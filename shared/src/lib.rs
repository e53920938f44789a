//! Shared types and models for the Farm Advisor platform
//!
//! Wire types, domain models and the advice rules used by the backend
//! server and the command-line advisor.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

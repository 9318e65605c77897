//! Application layer - Use cases and orchestration
//!
//! Contains the weather aggregation and policy composition services, the
//! port definitions they depend on, and application-level errors. Adapters
//! in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

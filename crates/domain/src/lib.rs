//! Domain layer for the climate policy dashboard
//!
//! Contains the core data model, value objects, and domain errors.
//! This layer has no knowledge of HTTP, providers, or rendering.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

//! Shared records for the F1 data API.
//!
//! `structs` holds the three persisted entities and their write payloads,
//! `placeholders` the entities that are routed but not yet stored.

pub mod error;
pub mod placeholders;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use placeholders::{ConstructorStanding, DriverStanding, Race, RaceResult, Season};
pub use structs::{Circuit, CircuitInput, Constructor, ConstructorInput, Driver, DriverInput, Podium};

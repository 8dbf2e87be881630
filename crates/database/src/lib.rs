//! # F1 Database Crate
//!
//! This crate is the query-construction and persistence layer of the API.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** all SQL lives here. The web layer talks to the
//!   `ConstructorStore`, `DriverStore` and `CircuitStore` traits and never
//!   sees a query string.
//! - **One filter per lookup:** each entity has a filter enum; a variant
//!   lowers to a single `column = $1` predicate, and the value is always a
//!   bound parameter.
//! - **Explicit absence:** single-record lookups return `Option`, list
//!   lookups return a possibly empty `Vec`. "Not found" is never an error.
//! - **Asynchronous & Pooled:** repositories share one `PgPool` created at
//!   startup and injected through their constructors.
//!
//! ## Public API
//!
//! - `connect`: builds the connection pool from `DatabaseSettings`.
//! - `Page`, `paginate`: page/limit resolution and the LIMIT/OFFSET clause.
//! - `Filter`, `Predicate`, `Lookup`, `select_statement`: the shared query builder.
//! - `Pg*Repository`: PostgreSQL implementations of the store traits.
//! - `DriverService`: driver writes with constructor name resolution.
//! - `DbError`: the specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
pub mod filter;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod pagination;
pub mod repository;
pub mod service;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_options};
pub use error::DbError;
pub use filter::{select_statement, Cardinality, Filter, FilterValue, Lookup, Predicate};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;
pub use pagination::{paginate, Page};
pub use repository::{
    CircuitFilter, CircuitStore, ConstructorFilter, ConstructorStore, DriverFilter, DriverStore,
    PgCircuitRepository, PgConstructorRepository, PgDriverRepository,
};
pub use service::DriverService;
pub use sqlx::postgres::PgPool;

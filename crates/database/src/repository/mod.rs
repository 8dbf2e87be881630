//! Repository traits and their PostgreSQL implementations.
//!
//! The HTTP layer only sees the traits; `Pg*Repository` types hold the
//! shared pool and carry the SQL.

mod circuit;
mod constructor;
mod driver;

pub use circuit::{CircuitFilter, PgCircuitRepository};
pub use constructor::{ConstructorFilter, PgConstructorRepository};
pub use driver::{DriverFilter, PgDriverRepository};

use crate::filter::{select_statement, Cardinality, FilterValue, Lookup, Predicate};
use crate::pagination::Page;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Circuit, CircuitInput, Constructor, ConstructorInput, Driver, DriverInput};
use sqlx::postgres::{PgArguments, PgPool, PgRow, Postgres};
use sqlx::query::Query;
use uuid::Uuid;

#[async_trait]
pub trait ConstructorStore: Send + Sync {
    /// Inserts a constructor under a freshly generated id.
    async fn create(&self, input: &ConstructorInput) -> Result<Constructor, DbError>;
    async fn get(&self, id: Uuid) -> Result<Option<Constructor>, DbError>;
    async fn find(
        &self,
        filter: &ConstructorFilter,
        page: Page,
    ) -> Result<Lookup<Constructor>, DbError>;
    /// Exact-match name lookup used to resolve a driver's team.
    async fn id_by_name(&self, name: &str) -> Result<Option<Uuid>, DbError>;
    /// Replaces every mutable field. `None` when no constructor has this id.
    async fn update(
        &self,
        id: Uuid,
        input: &ConstructorInput,
    ) -> Result<Option<Constructor>, DbError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DbError>;
}

#[async_trait]
pub trait DriverStore: Send + Sync {
    /// Inserts a driver under a freshly generated id. `constructor_id` must
    /// already be resolved from `input.constructor`.
    async fn create(&self, constructor_id: Uuid, input: &DriverInput) -> Result<Driver, DbError>;
    async fn get(&self, id: Uuid) -> Result<Option<Driver>, DbError>;
    async fn find(&self, filter: &DriverFilter, page: Page) -> Result<Lookup<Driver>, DbError>;
    async fn update(
        &self,
        id: Uuid,
        constructor_id: Uuid,
        input: &DriverInput,
    ) -> Result<Option<Driver>, DbError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DbError>;
}

#[async_trait]
pub trait CircuitStore: Send + Sync {
    async fn create(&self, input: &CircuitInput) -> Result<Circuit, DbError>;
    async fn get(&self, id: Uuid) -> Result<Option<Circuit>, DbError>;
    async fn find(&self, filter: &CircuitFilter, page: Page) -> Result<Lookup<Circuit>, DbError>;
    async fn update(&self, id: Uuid, input: &CircuitInput) -> Result<Option<Circuit>, DbError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DbError>;
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &FilterValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        FilterValue::Text(text) => query.bind(text.clone()),
        FilterValue::Integer(number) => query.bind(*number),
        FilterValue::Flag(flag) => query.bind(*flag),
        FilterValue::Id(id) => query.bind(*id),
    }
}

/// Runs one filtered SELECT and maps its rows.
///
/// Single-record predicates fetch at most one row; everything else fetches
/// the (possibly windowed) list.
async fn fetch_lookup<T>(
    pool: &PgPool,
    base: &str,
    order_by: &str,
    predicate: Option<Predicate>,
    page: Page,
    map_row: fn(PgRow) -> Result<T, sqlx::Error>,
) -> Result<Lookup<T>, DbError>
where
    T: Send + Unpin,
{
    let sql = select_statement(base, order_by, predicate.as_ref(), page);
    tracing::debug!(%sql, "Running filtered lookup.");

    let mut query = sqlx::query(&sql);
    if let Some(predicate) = &predicate {
        query = bind_value(query, &predicate.value);
    }
    let query = query.try_map(map_row);

    match predicate.map(|p| p.cardinality) {
        Some(Cardinality::Single) => Ok(Lookup::One(query.fetch_optional(pool).await?)),
        None | Some(Cardinality::Paged) | Some(Cardinality::Unpaged) => {
            Ok(Lookup::Many(query.fetch_all(pool).await?))
        }
    }
}

/// Fetches one record by primary key.
async fn fetch_by_id<T>(
    pool: &PgPool,
    base: &str,
    id_column: &'static str,
    id: Uuid,
    map_row: fn(PgRow) -> Result<T, sqlx::Error>,
) -> Result<Option<T>, DbError>
where
    T: Send + Unpin,
{
    let predicate = Predicate::single(id_column, FilterValue::Id(id));
    let lookup = fetch_lookup(pool, base, id_column, Some(predicate), Page::default(), map_row).await?;
    Ok(lookup.into_one())
}

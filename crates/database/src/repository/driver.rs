use super::{fetch_by_id, fetch_lookup, DriverStore};
use crate::filter::{Filter, FilterValue, Lookup, Predicate};
use crate::pagination::Page;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Driver, DriverInput};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

// Every read joins the constructor to surface its display name. The INNER JOIN
// hides a driver whose constructor row is gone, which the schema's
// ON DELETE RESTRICT rules out.
const SELECT_DRIVERS: &str = r#"
    SELECT d.id, c.name AS constructor, d.ref, d.code, d.number, d.first_name, d.last_name,
           d.date_of_birth, d.nationality, d.status, d.url
    FROM drivers d
    INNER JOIN constructors c ON d.constructor_id = c.id
"#;
const ORDER_BY: &str = "d.ref, d.id";

/// Driver lookup strategies, in the precedence the query string is read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DriverFilter {
    #[default]
    All,
    FirstName(String),
    LastName(String),
    /// Constructor display name.
    Team(String),
    Nationality(String),
    Status(String),
    Ref(String),
    Code(String),
    Number(i32),
    Url(String),
}

impl Filter for DriverFilter {
    fn predicate(&self) -> Option<Predicate> {
        let predicate = match self {
            DriverFilter::All => return None,
            DriverFilter::FirstName(v) => Predicate::paged("d.first_name", v.as_str()),
            DriverFilter::LastName(v) => Predicate::paged("d.last_name", v.as_str()),
            DriverFilter::Team(v) => Predicate::paged("c.name", v.as_str()),
            DriverFilter::Nationality(v) => Predicate::paged("d.nationality", v.as_str()),
            DriverFilter::Status(v) => Predicate::paged("d.status", v.as_str()),
            DriverFilter::Ref(v) => Predicate::single("d.ref", FilterValue::Text(v.clone())),
            DriverFilter::Code(v) => Predicate::single("d.code", FilterValue::Text(v.clone())),
            DriverFilter::Number(n) => Predicate::single("d.number", FilterValue::Integer(*n)),
            DriverFilter::Url(v) => Predicate::single("d.url", FilterValue::Text(v.clone())),
        };
        Some(predicate)
    }
}

fn map_driver(row: PgRow) -> Result<Driver, sqlx::Error> {
    Ok(Driver {
        id: row.try_get("id")?,
        constructor: row.try_get("constructor")?,
        reference: row.try_get("ref")?,
        code: row.try_get("code")?,
        number: row.try_get("number")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        nationality: row.try_get("nationality")?,
        status: row.try_get("status")?,
        url: row.try_get("url")?,
    })
}

#[derive(Debug, Clone)]
pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverStore for PgDriverRepository {
    async fn create(&self, constructor_id: Uuid, input: &DriverInput) -> Result<Driver, DbError> {
        let driver = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO drivers (id, constructor_id, ref, code, number, first_name, last_name,
                                     date_of_birth, nationality, status, url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
            )
            SELECT d.id, c.name AS constructor, d.ref, d.code, d.number, d.first_name, d.last_name,
                   d.date_of_birth, d.nationality, d.status, d.url
            FROM inserted d
            INNER JOIN constructors c ON d.constructor_id = c.id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(constructor_id)
        .bind(&input.reference)
        .bind(input.code.as_deref())
        .bind(input.number)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.date_of_birth)
        .bind(&input.nationality)
        .bind(&input.status)
        .bind(&input.url)
        .try_map(map_driver)
        .fetch_one(&self.pool)
        .await?;
        Ok(driver)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Driver>, DbError> {
        fetch_by_id(&self.pool, SELECT_DRIVERS, "d.id", id, map_driver).await
    }

    async fn find(&self, filter: &DriverFilter, page: Page) -> Result<Lookup<Driver>, DbError> {
        fetch_lookup(
            &self.pool,
            SELECT_DRIVERS,
            ORDER_BY,
            filter.predicate(),
            page,
            map_driver,
        )
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        constructor_id: Uuid,
        input: &DriverInput,
    ) -> Result<Option<Driver>, DbError> {
        let driver = sqlx::query(
            r#"
            WITH updated AS (
                UPDATE drivers
                SET constructor_id = $1, ref = $2, code = $3, number = $4, first_name = $5,
                    last_name = $6, date_of_birth = $7, nationality = $8, status = $9, url = $10
                WHERE id = $11
                RETURNING *
            )
            SELECT d.id, c.name AS constructor, d.ref, d.code, d.number, d.first_name, d.last_name,
                   d.date_of_birth, d.nationality, d.status, d.url
            FROM updated d
            INNER JOIN constructors c ON d.constructor_id = c.id
            "#,
        )
        .bind(constructor_id)
        .bind(&input.reference)
        .bind(input.code.as_deref())
        .bind(input.number)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.date_of_birth)
        .bind(&input.nationality)
        .bind(&input.status)
        .bind(&input.url)
        .bind(id)
        .try_map(map_driver)
        .fetch_optional(&self.pool)
        .await?;
        Ok(driver)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

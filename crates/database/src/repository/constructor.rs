use super::{fetch_by_id, fetch_lookup, ConstructorStore};
use crate::filter::{Filter, FilterValue, Lookup, Predicate};
use crate::pagination::Page;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Constructor, ConstructorInput};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

const SELECT_CONSTRUCTORS: &str = "SELECT id, ref, name, nationality, url FROM constructors";
const ORDER_BY: &str = "ref, id";

/// Constructor lookup strategies, in the precedence the query string is read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConstructorFilter {
    #[default]
    All,
    Name(String),
    Nationality(String),
    Ref(String),
}

impl Filter for ConstructorFilter {
    fn predicate(&self) -> Option<Predicate> {
        match self {
            ConstructorFilter::All => None,
            ConstructorFilter::Name(name) => Some(Predicate::paged("name", name.as_str())),
            ConstructorFilter::Nationality(nationality) => {
                Some(Predicate::paged("nationality", nationality.as_str()))
            }
            ConstructorFilter::Ref(reference) => Some(Predicate::single(
                "ref",
                FilterValue::Text(reference.clone()),
            )),
        }
    }
}

fn map_constructor(row: PgRow) -> Result<Constructor, sqlx::Error> {
    Ok(Constructor {
        id: row.try_get("id")?,
        reference: row.try_get("ref")?,
        name: row.try_get("name")?,
        nationality: row.try_get("nationality")?,
        url: row.try_get("url")?,
    })
}

#[derive(Debug, Clone)]
pub struct PgConstructorRepository {
    pool: PgPool,
}

impl PgConstructorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConstructorStore for PgConstructorRepository {
    async fn create(&self, input: &ConstructorInput) -> Result<Constructor, DbError> {
        let constructor = sqlx::query(
            r#"
            INSERT INTO constructors (id, ref, name, nationality, url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ref, name, nationality, url
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.reference)
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(&input.url)
        .try_map(map_constructor)
        .fetch_one(&self.pool)
        .await?;
        Ok(constructor)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Constructor>, DbError> {
        fetch_by_id(&self.pool, SELECT_CONSTRUCTORS, "id", id, map_constructor).await
    }

    async fn find(
        &self,
        filter: &ConstructorFilter,
        page: Page,
    ) -> Result<Lookup<Constructor>, DbError> {
        fetch_lookup(
            &self.pool,
            SELECT_CONSTRUCTORS,
            ORDER_BY,
            filter.predicate(),
            page,
            map_constructor,
        )
        .await
    }

    async fn id_by_name(&self, name: &str) -> Result<Option<Uuid>, DbError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM constructors WHERE name = $1 ORDER BY ref, id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &ConstructorInput,
    ) -> Result<Option<Constructor>, DbError> {
        let constructor = sqlx::query(
            r#"
            UPDATE constructors
            SET ref = $1, name = $2, nationality = $3, url = $4
            WHERE id = $5
            RETURNING id, ref, name, nationality, url
            "#,
        )
        .bind(&input.reference)
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(&input.url)
        .bind(id)
        .try_map(map_constructor)
        .fetch_optional(&self.pool)
        .await?;
        Ok(constructor)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM constructors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_foreign_key_violation() => DbError::ConstructorInUse(id),
                _ => DbError::Query(e),
            })?;
        Ok(result.rows_affected() > 0)
    }
}

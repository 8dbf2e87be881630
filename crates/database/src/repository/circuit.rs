use super::{fetch_by_id, fetch_lookup, CircuitStore};
use crate::filter::{Filter, FilterValue, Lookup, Predicate};
use crate::pagination::Page;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Circuit, CircuitInput, Podium};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

const SELECT_CIRCUITS: &str = r#"
    SELECT id, ref, name, location, country, "current", url,
           podium_first, podium_second, podium_third
    FROM circuits
"#;
const ORDER_BY: &str = "ref, id";

/// Circuit lookup strategies, in the precedence the query string is read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CircuitFilter {
    #[default]
    All,
    Name(String),
    Location(String),
    Country(String),
    /// Every circuit on (or off) the current calendar, unpaged.
    Current(bool),
    Ref(String),
    Url(String),
}

impl Filter for CircuitFilter {
    fn predicate(&self) -> Option<Predicate> {
        let predicate = match self {
            CircuitFilter::All => return None,
            CircuitFilter::Name(v) => Predicate::paged("name", v.as_str()),
            CircuitFilter::Location(v) => Predicate::paged("location", v.as_str()),
            CircuitFilter::Country(v) => Predicate::paged("country", v.as_str()),
            CircuitFilter::Current(flag) => {
                Predicate::unpaged("\"current\"", FilterValue::Flag(*flag))
            }
            CircuitFilter::Ref(v) => Predicate::single("ref", FilterValue::Text(v.clone())),
            CircuitFilter::Url(v) => Predicate::single("url", FilterValue::Text(v.clone())),
        };
        Some(predicate)
    }
}

fn map_circuit(row: PgRow) -> Result<Circuit, sqlx::Error> {
    let podium = Podium::from_places(
        row.try_get("podium_first")?,
        row.try_get("podium_second")?,
        row.try_get("podium_third")?,
    )
    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Circuit {
        id: row.try_get("id")?,
        reference: row.try_get("ref")?,
        name: row.try_get("name")?,
        location: row.try_get("location")?,
        country: row.try_get("country")?,
        current: row.try_get("current")?,
        url: row.try_get("url")?,
        podium,
    })
}

#[derive(Debug, Clone)]
pub struct PgCircuitRepository {
    pool: PgPool,
}

impl PgCircuitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CircuitStore for PgCircuitRepository {
    async fn create(&self, input: &CircuitInput) -> Result<Circuit, DbError> {
        let (first, second, third) = Podium::places(input.podium.as_ref());
        let circuit = sqlx::query(
            r#"
            INSERT INTO circuits (id, ref, name, location, country, "current", url,
                                  podium_first, podium_second, podium_third)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, ref, name, location, country, "current", url,
                      podium_first, podium_second, podium_third
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.reference)
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.country)
        .bind(input.current)
        .bind(&input.url)
        .bind(first)
        .bind(second)
        .bind(third)
        .try_map(map_circuit)
        .fetch_one(&self.pool)
        .await?;
        Ok(circuit)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Circuit>, DbError> {
        fetch_by_id(&self.pool, SELECT_CIRCUITS, "id", id, map_circuit).await
    }

    async fn find(&self, filter: &CircuitFilter, page: Page) -> Result<Lookup<Circuit>, DbError> {
        fetch_lookup(
            &self.pool,
            SELECT_CIRCUITS,
            ORDER_BY,
            filter.predicate(),
            page,
            map_circuit,
        )
        .await
    }

    async fn update(&self, id: Uuid, input: &CircuitInput) -> Result<Option<Circuit>, DbError> {
        let (first, second, third) = Podium::places(input.podium.as_ref());
        let circuit = sqlx::query(
            r#"
            UPDATE circuits
            SET ref = $1, name = $2, location = $3, country = $4, "current" = $5, url = $6,
                podium_first = $7, podium_second = $8, podium_third = $9
            WHERE id = $10
            RETURNING id, ref, name, location, country, "current", url,
                      podium_first, podium_second, podium_third
            "#,
        )
        .bind(&input.reference)
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.country)
        .bind(input.current)
        .bind(&input.url)
        .bind(first)
        .bind(second)
        .bind(third)
        .bind(id)
        .try_map(map_circuit)
        .fetch_optional(&self.pool)
        .await?;
        Ok(circuit)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM circuits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{select_statement, Cardinality};

    #[test]
    fn current_flag_is_quoted_and_returns_every_match() {
        let predicate = CircuitFilter::Current(true).predicate().unwrap();
        assert_eq!(predicate.value, FilterValue::Flag(true));
        assert_eq!(predicate.cardinality, Cardinality::Unpaged);

        let sql = select_statement(SELECT_CIRCUITS, ORDER_BY, Some(&predicate), Page::new(5, 5));
        assert!(sql.ends_with("WHERE \"current\" = $1 ORDER BY ref, id"));
    }

    #[test]
    fn location_and_country_are_paged_lists() {
        assert_eq!(
            CircuitFilter::Location("Monza".into()).cardinality(),
            Cardinality::Paged
        );
        assert_eq!(
            CircuitFilter::Country("Italy".into()).cardinality(),
            Cardinality::Paged
        );
        assert_eq!(CircuitFilter::Url("u".into()).cardinality(), Cardinality::Single);
        assert_eq!(CircuitFilter::All.predicate(), None);
    }
}

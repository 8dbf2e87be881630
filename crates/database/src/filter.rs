//! Single-predicate SELECT construction shared by every repository.
//!
//! Each entity has a filter enum whose variants name one lookup strategy.
//! A variant lowers to at most one [`Predicate`]: an equality test on one
//! column, the value to bind as `$1`, and how many rows the lookup can
//! return.

use crate::pagination::{paginate, Page};
use uuid::Uuid;

/// A value bound as the single `$1` parameter of a filtered query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i32),
    Flag(bool),
    Id(Uuid),
}

/// How many rows a predicate can match, and whether the result is windowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one logical record; fetched with no row window.
    Single,
    /// A list, windowed by LIMIT/OFFSET.
    Paged,
    /// A list returned whole (e.g. a boolean flag).
    Unpaged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Qualified column name, e.g. `d.first_name` or `c.name`.
    pub column: &'static str,
    pub value: FilterValue,
    pub cardinality: Cardinality,
}

impl Predicate {
    pub fn single(column: &'static str, value: FilterValue) -> Self {
        Self {
            column,
            value,
            cardinality: Cardinality::Single,
        }
    }

    pub fn paged(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: FilterValue::Text(value.into()),
            cardinality: Cardinality::Paged,
        }
    }

    pub fn unpaged(column: &'static str, value: FilterValue) -> Self {
        Self {
            column,
            value,
            cardinality: Cardinality::Unpaged,
        }
    }
}

/// Implemented by each entity's filter enum.
pub trait Filter {
    /// The equality predicate for this filter, or `None` for the unfiltered listing.
    fn predicate(&self) -> Option<Predicate>;

    fn cardinality(&self) -> Cardinality {
        self.predicate()
            .map_or(Cardinality::Paged, |p| p.cardinality)
    }
}

/// Builds `<base> [WHERE <column> = $1] ORDER BY <order_by> [LIMIT .. OFFSET ..]`.
///
/// The row window is only applied to paged lookups; the unfiltered listing
/// (`predicate == None`) is paged.
pub fn select_statement(
    base: &str,
    order_by: &str,
    predicate: Option<&Predicate>,
    page: Page,
) -> String {
    let mut sql = base.trim().to_string();
    if let Some(predicate) = predicate {
        sql.push_str(" WHERE ");
        sql.push_str(predicate.column);
        sql.push_str(" = $1");
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(order_by);

    match predicate.map(|p| p.cardinality) {
        None | Some(Cardinality::Paged) => paginate(&sql, page),
        Some(Cardinality::Single) | Some(Cardinality::Unpaged) => sql,
    }
}

/// The outcome of a filtered lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// A single-record lookup; `None` when nothing matched.
    One(Option<T>),
    /// A list lookup; empty when nothing matched.
    Many(Vec<T>),
}

impl<T> Lookup<T> {
    /// Collapses either shape to its first record.
    pub fn into_one(self) -> Option<T> {
        match self {
            Lookup::One(record) => record,
            Lookup::Many(records) => records.into_iter().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT id, ref FROM constructors";

    #[test]
    fn unfiltered_listing_is_paged() {
        let sql = select_statement(BASE, "ref, id", None, Page::new(2, 5));
        assert_eq!(sql, "SELECT id, ref FROM constructors ORDER BY ref, id LIMIT 5 OFFSET 5");
    }

    #[test]
    fn paged_predicate_binds_one_parameter_and_windows() {
        let predicate = Predicate::paged("nationality", "German");
        let sql = select_statement(BASE, "ref, id", Some(&predicate), Page::default());
        assert_eq!(
            sql,
            "SELECT id, ref FROM constructors WHERE nationality = $1 ORDER BY ref, id LIMIT 10 OFFSET 0"
        );
    }

    #[test]
    fn single_and_unpaged_predicates_are_not_windowed() {
        let single = Predicate::single("ref", FilterValue::Text("mercedes".into()));
        let sql = select_statement(BASE, "ref, id", Some(&single), Page::new(3, 3));
        assert_eq!(sql, "SELECT id, ref FROM constructors WHERE ref = $1 ORDER BY ref, id");

        let flag = Predicate::unpaged("\"current\"", FilterValue::Flag(true));
        let sql = select_statement("SELECT * FROM circuits", "ref, id", Some(&flag), Page::new(3, 3));
        assert_eq!(sql, "SELECT * FROM circuits WHERE \"current\" = $1 ORDER BY ref, id");
    }

    #[test]
    fn filter_values_never_reach_the_sql_text() {
        let predicate = Predicate::paged("name", "'; DROP TABLE constructors; --");
        let sql = select_statement(BASE, "ref, id", Some(&predicate), Page::default());
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn into_one_takes_the_first_record() {
        assert_eq!(Lookup::One(Some(1)).into_one(), Some(1));
        assert_eq!(Lookup::<i32>::One(None).into_one(), None);
        assert_eq!(Lookup::Many(vec![4, 5]).into_one(), Some(4));
        assert_eq!(Lookup::<i32>::Many(vec![]).into_one(), None);
    }
}

//! Repository tests against a live PostgreSQL.
//!
//! Skipped unless `F1_TEST_DATABASE_URL` points at a database the tests may
//! create tables in. Every test uses its own random names so runs can share
//! one database.

use chrono::NaiveDate;
use core_types::{CircuitInput, ConstructorInput, DriverInput, Podium};
use database::{
    CircuitFilter, CircuitStore, ConstructorFilter, ConstructorStore, DbError, DriverFilter,
    DriverService, DriverStore, Lookup, Page, PgCircuitRepository, PgConstructorRepository,
    PgDriverRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

const SCHEMA: &str = include_str!("../sql/schema.sql");

async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("F1_TEST_DATABASE_URL") else {
        eprintln!("[database-test] skipping: F1_TEST_DATABASE_URL is not set");
        return None;
    };
    let pool = PgPool::connect(&url).await.expect("test database should be reachable");
    let bootstrap = format!("BEGIN; SELECT pg_advisory_xact_lock(4216042); {SCHEMA} COMMIT;");
    sqlx::raw_sql(&bootstrap)
        .execute(&pool)
        .await
        .expect("schema should apply");
    Some(pool)
}

fn tag() -> String {
    Uuid::new_v4().simple().to_string()
}

fn constructor_input(tag: &str, name: &str, nationality: &str) -> ConstructorInput {
    ConstructorInput {
        reference: format!("{name}-{tag}").to_lowercase(),
        name: format!("{name} {tag}"),
        nationality: nationality.to_string(),
        url: format!("http://example.com/{name}/{tag}"),
    }
}

fn driver_input(constructor: &str, reference: &str, number: Option<i32>) -> DriverInput {
    DriverInput {
        constructor: constructor.to_string(),
        reference: reference.to_string(),
        code: None,
        number,
        first_name: "Test".to_string(),
        last_name: reference.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
        nationality: "Testish".to_string(),
        status: "active".to_string(),
        url: format!("http://example.com/drivers/{reference}"),
    }
}

#[tokio::test]
async fn constructor_crud_round_trip() {
    let Some(pool) = test_pool().await else { return };
    let repo = PgConstructorRepository::new(pool);
    let tag = tag();

    let created = repo.create(&constructor_input(&tag, "Mercedes", "German")).await.unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(repo.get(created.id).await.unwrap(), Some(created.clone()));

    let by_ref = repo
        .find(&ConstructorFilter::Ref(created.reference.clone()), Page::default())
        .await
        .unwrap();
    assert_eq!(by_ref, Lookup::One(Some(created.clone())));

    let mut changed = constructor_input(&tag, "Mercedes", "British");
    changed.url = "http://example.com/changed".to_string();
    let updated = repo.update(created.id, &changed).await.unwrap().unwrap();
    assert_eq!(updated.nationality, "British");
    assert_eq!(repo.get(created.id).await.unwrap(), Some(updated));

    assert!(repo.delete(created.id).await.unwrap());
    assert_eq!(repo.get(created.id).await.unwrap(), None);
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn duplicate_constructor_ref_is_a_query_error() {
    let Some(pool) = test_pool().await else { return };
    let repo = PgConstructorRepository::new(pool);
    let tag = tag();

    let first = repo.create(&constructor_input(&tag, "Mercedes", "German")).await.unwrap();
    let other = repo.create(&constructor_input(&tag, "Brawn", "British")).await.unwrap();

    let mut clash = constructor_input(&tag, "Mercedes", "British");
    clash.name = format!("Mercedes AMG {tag}");
    let err = repo.create(&clash).await.unwrap_err();
    assert!(
        matches!(&err, DbError::Query(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation())),
        "unexpected error: {err:?}"
    );

    clash.name = other.name.clone();
    let err = repo.update(other.id, &clash).await.unwrap_err();
    assert!(matches!(err, DbError::Query(_)));
    assert_eq!(repo.get(other.id).await.unwrap(), Some(other));
    assert_eq!(repo.get(first.id).await.unwrap(), Some(first));
}

#[tokio::test]
async fn missing_single_lookups_are_none_not_errors() {
    let Some(pool) = test_pool().await else { return };
    let repo = PgDriverRepository::new(pool);

    let lookup = repo
        .find(&DriverFilter::Ref(format!("nobody-{}", tag())), Page::default())
        .await
        .unwrap();
    assert_eq!(lookup, Lookup::One(None));
    assert_eq!(repo.update(Uuid::new_v4(), Uuid::new_v4(), &driver_input("x", "x", None)).await.unwrap(), None);
}

#[tokio::test]
async fn consecutive_pages_are_disjoint() {
    let Some(pool) = test_pool().await else { return };
    let repo = PgConstructorRepository::new(pool);
    let nationality = format!("Paged-{}", tag());

    for i in 0..15 {
        repo.create(&constructor_input(&format!("{i:02}-{}", tag()), "Team", &nationality))
            .await
            .unwrap();
    }

    let filter = ConstructorFilter::Nationality(nationality);
    let Lookup::Many(first) = repo.find(&filter, Page::new(1, 10)).await.unwrap() else {
        panic!("nationality lookup should be a list");
    };
    let Lookup::Many(second) = repo.find(&filter, Page::new(2, 10)).await.unwrap() else {
        panic!("nationality lookup should be a list");
    };

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);
    assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
    assert!(first.last().unwrap().reference < second[0].reference);
}

#[tokio::test]
async fn driver_reads_join_the_constructor_name() {
    let Some(pool) = test_pool().await else { return };
    let constructors = Arc::new(PgConstructorRepository::new(pool.clone()));
    let drivers = Arc::new(PgDriverRepository::new(pool));
    let service = DriverService::new(constructors.clone(), drivers.clone());
    let tag = tag();

    let team = constructors.create(&constructor_input(&tag, "Williams", "British")).await.unwrap();
    let reference = format!("albon-{tag}");
    let created = service
        .create(&driver_input(&team.name, &reference, Some(23)))
        .await
        .unwrap();
    assert_eq!(created.constructor, team.name);
    assert_eq!(created.code, None);
    assert_eq!(created.number, Some(23));

    let Lookup::Many(by_team) = drivers
        .find(&DriverFilter::Team(team.name.clone()), Page::default())
        .await
        .unwrap()
    else {
        panic!("team lookup should be a list");
    };
    assert_eq!(by_team, vec![created.clone()]);

    let err = constructors.delete(team.id).await.unwrap_err();
    assert!(matches!(err, DbError::ConstructorInUse(id) if id == team.id));

    let err = service
        .create(&driver_input(&format!("Nonexistent {tag}"), &format!("ghost-{tag}"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ConstructorNotFound(_)));
    let ghost = drivers
        .find(&DriverFilter::Ref(format!("ghost-{tag}")), Page::default())
        .await
        .unwrap();
    assert_eq!(ghost, Lookup::One(None));

    assert!(drivers.delete(created.id).await.unwrap());
    assert!(constructors.delete(team.id).await.unwrap());
}

#[tokio::test]
async fn circuit_podium_survives_a_round_trip() {
    let Some(pool) = test_pool().await else { return };
    let repo = PgCircuitRepository::new(pool);
    let tag = tag();
    let podium = Podium {
        first: Uuid::new_v4(),
        second: Uuid::new_v4(),
        third: Uuid::new_v4(),
    };

    let created = repo
        .create(&CircuitInput {
            reference: format!("monza-{tag}"),
            name: "Autodromo Nazionale di Monza".to_string(),
            location: format!("Monza {tag}"),
            country: "Italy".to_string(),
            current: true,
            url: format!("http://example.com/monza/{tag}"),
            podium: Some(podium),
        })
        .await
        .unwrap();
    assert_eq!(created.podium, Some(podium));

    let by_url = repo
        .find(&CircuitFilter::Url(created.url.clone()), Page::default())
        .await
        .unwrap();
    assert_eq!(by_url, Lookup::One(Some(created.clone())));

    let Lookup::Many(by_location) = repo
        .find(&CircuitFilter::Location(created.location.clone()), Page::default())
        .await
        .unwrap()
    else {
        panic!("location lookup should be a list");
    };
    assert_eq!(by_location, vec![created.clone()]);

    assert!(repo.delete(created.id).await.unwrap());
}

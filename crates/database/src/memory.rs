//! An in-process implementation of the repository traits for tests.
//!
//! It follows the PostgreSQL repositories' observable behavior: `ref, id`
//! ordering, the same page windows, the inner join from drivers to
//! constructors and the restrict rule on constructor deletes.

use crate::filter::{Cardinality, Filter, Lookup};
use crate::pagination::Page;
use crate::repository::{
    CircuitFilter, CircuitStore, ConstructorFilter, ConstructorStore, DriverFilter, DriverStore,
};
use crate::DbError;
use async_trait::async_trait;
use core_types::{Circuit, CircuitInput, Constructor, ConstructorInput, Driver, DriverInput};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    constructors: Vec<Constructor>,
    drivers: Vec<StoredDriver>,
    circuits: Vec<Circuit>,
}

/// A driver row: the constructor is kept by id, the name is joined on read.
#[derive(Debug, Clone)]
struct StoredDriver {
    constructor_id: Uuid,
    driver: Driver,
}

impl MemoryStore {
    pub fn constructors(&self) -> &dyn ConstructorStore {
        self
    }

    pub fn drivers(&self) -> &dyn DriverStore {
        self
    }

    pub fn circuits(&self) -> &dyn CircuitStore {
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn joined_drivers(&self) -> Vec<Driver> {
        let mut drivers: Vec<Driver> = self
            .drivers
            .iter()
            .filter_map(|stored| {
                let constructor = self
                    .constructors
                    .iter()
                    .find(|c| c.id == stored.constructor_id)?;
                Some(Driver {
                    constructor: constructor.name.clone(),
                    ..stored.driver.clone()
                })
            })
            .collect();
        drivers.sort_by(|a, b| (&a.reference, a.id).cmp(&(&b.reference, b.id)));
        drivers
    }

    fn has_constructor(&self, id: Uuid) -> bool {
        self.constructors.iter().any(|c| c.id == id)
    }

    /// Whether a constructor other than `except` already uses `reference`.
    fn ref_taken(&self, reference: &str, except: Option<Uuid>) -> bool {
        self.constructors
            .iter()
            .any(|c| c.reference == reference && Some(c.id) != except)
    }
}

fn window<T>(rows: Vec<T>, cardinality: Cardinality, page: Page) -> Lookup<T> {
    match cardinality {
        Cardinality::Single => Lookup::One(rows.into_iter().next()),
        Cardinality::Unpaged => Lookup::Many(rows),
        Cardinality::Paged => {
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
            Lookup::Many(rows.into_iter().skip(offset).take(limit).collect())
        }
    }
}

// Postgres raises a foreign key violation here; any query error maps to a 500.
fn missing_constructor_row() -> DbError {
    DbError::Query(sqlx::Error::RowNotFound)
}

// Stands in for the unique violation on `constructors.ref`.
fn duplicate_constructor_ref(reference: &str) -> DbError {
    DbError::Query(sqlx::Error::Protocol(format!(
        "duplicate key value violates unique constraint \"constructors_ref_key\": ref={reference}"
    )))
}

#[async_trait]
impl ConstructorStore for MemoryStore {
    async fn create(&self, input: &ConstructorInput) -> Result<Constructor, DbError> {
        let mut state = self.lock();
        if state.ref_taken(&input.reference, None) {
            return Err(duplicate_constructor_ref(&input.reference));
        }
        let constructor = input.clone().into_record(Uuid::new_v4());
        state.constructors.push(constructor.clone());
        Ok(constructor)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Constructor>, DbError> {
        Ok(self.lock().constructors.iter().find(|c| c.id == id).cloned())
    }

    async fn find(
        &self,
        filter: &ConstructorFilter,
        page: Page,
    ) -> Result<Lookup<Constructor>, DbError> {
        let mut rows: Vec<Constructor> = self
            .lock()
            .constructors
            .iter()
            .filter(|c| match filter {
                ConstructorFilter::All => true,
                ConstructorFilter::Name(name) => &c.name == name,
                ConstructorFilter::Nationality(nationality) => &c.nationality == nationality,
                ConstructorFilter::Ref(reference) => &c.reference == reference,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.reference, a.id).cmp(&(&b.reference, b.id)));
        Ok(window(rows, filter.cardinality(), page))
    }

    async fn id_by_name(&self, name: &str) -> Result<Option<Uuid>, DbError> {
        Ok(self
            .lock()
            .constructors
            .iter()
            .filter(|c| c.name == name)
            .min_by(|a, b| (&a.reference, a.id).cmp(&(&b.reference, b.id)))
            .map(|c| c.id))
    }

    async fn update(
        &self,
        id: Uuid,
        input: &ConstructorInput,
    ) -> Result<Option<Constructor>, DbError> {
        let mut state = self.lock();
        if !state.has_constructor(id) {
            return Ok(None);
        }
        if state.ref_taken(&input.reference, Some(id)) {
            return Err(duplicate_constructor_ref(&input.reference));
        }
        let Some(slot) = state.constructors.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        *slot = input.clone().into_record(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let mut state = self.lock();
        if state.drivers.iter().any(|d| d.constructor_id == id) {
            return Err(DbError::ConstructorInUse(id));
        }
        let before = state.constructors.len();
        state.constructors.retain(|c| c.id != id);
        Ok(state.constructors.len() < before)
    }
}

#[async_trait]
impl DriverStore for MemoryStore {
    async fn create(&self, constructor_id: Uuid, input: &DriverInput) -> Result<Driver, DbError> {
        let mut state = self.lock();
        if !state.has_constructor(constructor_id) {
            return Err(missing_constructor_row());
        }
        let driver = input.clone().into_record(Uuid::new_v4());
        state.drivers.push(StoredDriver {
            constructor_id,
            driver: driver.clone(),
        });
        Ok(driver)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Driver>, DbError> {
        Ok(self.lock().joined_drivers().into_iter().find(|d| d.id == id))
    }

    async fn find(&self, filter: &DriverFilter, page: Page) -> Result<Lookup<Driver>, DbError> {
        let rows: Vec<Driver> = self
            .lock()
            .joined_drivers()
            .into_iter()
            .filter(|d| match filter {
                DriverFilter::All => true,
                DriverFilter::FirstName(v) => &d.first_name == v,
                DriverFilter::LastName(v) => &d.last_name == v,
                DriverFilter::Team(v) => &d.constructor == v,
                DriverFilter::Nationality(v) => &d.nationality == v,
                DriverFilter::Status(v) => &d.status == v,
                DriverFilter::Ref(v) => &d.reference == v,
                DriverFilter::Code(v) => d.code.as_ref() == Some(v),
                DriverFilter::Number(n) => d.number == Some(*n),
                DriverFilter::Url(v) => &d.url == v,
            })
            .collect();
        Ok(window(rows, filter.cardinality(), page))
    }

    async fn update(
        &self,
        id: Uuid,
        constructor_id: Uuid,
        input: &DriverInput,
    ) -> Result<Option<Driver>, DbError> {
        let mut state = self.lock();
        if !state.has_constructor(constructor_id) {
            return Err(missing_constructor_row());
        }
        let Some(slot) = state.drivers.iter_mut().find(|d| d.driver.id == id) else {
            return Ok(None);
        };
        *slot = StoredDriver {
            constructor_id,
            driver: input.clone().into_record(id),
        };
        Ok(Some(slot.driver.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let mut state = self.lock();
        let before = state.drivers.len();
        state.drivers.retain(|d| d.driver.id != id);
        Ok(state.drivers.len() < before)
    }
}

#[async_trait]
impl CircuitStore for MemoryStore {
    async fn create(&self, input: &CircuitInput) -> Result<Circuit, DbError> {
        let circuit = input.clone().into_record(Uuid::new_v4());
        self.lock().circuits.push(circuit.clone());
        Ok(circuit)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Circuit>, DbError> {
        Ok(self.lock().circuits.iter().find(|c| c.id == id).cloned())
    }

    async fn find(&self, filter: &CircuitFilter, page: Page) -> Result<Lookup<Circuit>, DbError> {
        let mut rows: Vec<Circuit> = self
            .lock()
            .circuits
            .iter()
            .filter(|c| match filter {
                CircuitFilter::All => true,
                CircuitFilter::Name(v) => &c.name == v,
                CircuitFilter::Location(v) => &c.location == v,
                CircuitFilter::Country(v) => &c.country == v,
                CircuitFilter::Current(flag) => c.current == *flag,
                CircuitFilter::Ref(v) => &c.reference == v,
                CircuitFilter::Url(v) => &c.url == v,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.reference, a.id).cmp(&(&b.reference, b.id)));
        Ok(window(rows, filter.cardinality(), page))
    }

    async fn update(&self, id: Uuid, input: &CircuitInput) -> Result<Option<Circuit>, DbError> {
        let mut state = self.lock();
        let Some(slot) = state.circuits.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        *slot = input.clone().into_record(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let mut state = self.lock();
        let before = state.circuits.len();
        state.circuits.retain(|c| c.id != id);
        Ok(state.circuits.len() < before)
    }
}

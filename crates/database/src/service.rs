use crate::repository::{ConstructorStore, DriverStore};
use crate::DbError;
use core_types::{Driver, DriverInput};
use std::sync::Arc;
use uuid::Uuid;

/// Driver writes, which first resolve the constructor by display name.
///
/// The lookup and the write are two separate round-trips with no
/// transaction around them.
#[derive(Clone)]
pub struct DriverService {
    constructors: Arc<dyn ConstructorStore>,
    drivers: Arc<dyn DriverStore>,
}

impl DriverService {
    pub fn new(constructors: Arc<dyn ConstructorStore>, drivers: Arc<dyn DriverStore>) -> Self {
        Self {
            constructors,
            drivers,
        }
    }

    /// Fails with [`DbError::ConstructorNotFound`] before anything is
    /// written when `input.constructor` names no constructor.
    pub async fn create(&self, input: &DriverInput) -> Result<Driver, DbError> {
        let constructor_id = self.resolve_constructor(&input.constructor).await?;
        self.drivers.create(constructor_id, input).await
    }

    /// `Ok(None)` when no driver has this id.
    pub async fn update(&self, id: Uuid, input: &DriverInput) -> Result<Option<Driver>, DbError> {
        let constructor_id = self.resolve_constructor(&input.constructor).await?;
        self.drivers.update(id, constructor_id, input).await
    }

    async fn resolve_constructor(&self, name: &str) -> Result<Uuid, DbError> {
        self.constructors
            .id_by_name(name)
            .await?
            .ok_or_else(|| DbError::ConstructorNotFound(name.to_string()))
    }
}

//! Repositorios
//!
//! Los controllers dependen de los traits `UserRepository` y
//! `VehicleRepository`; las implementaciones PostgreSQL viven en los
//! submódulos. "No encontrado" se devuelve como `Ok(None)` / `Ok(false)`,
//! las violaciones de unicidad como `AppError::Conflict`.

pub mod user_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewUser, NewVehicle, User, UserChanges, Vehicle, VehicleChanges, VehicleWithOwner};
use crate::utils::errors::{referenced_error, AppError, AppResult};

pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Todos los usuarios, más recientes primero
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, user: NewUser) -> AppResult<User>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>>;
    /// Devuelve la fila borrada
    async fn delete(&self, id: Uuid) -> AppResult<Option<User>>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Todos los vehículos con su dueño, más recientes primero
    async fn list(&self) -> AppResult<Vec<VehicleWithOwner>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VehicleWithOwner>>;
    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>>;
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;
    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Traduce errores de escritura: unicidad → `conflict`, FK → Conflict genérico
pub(crate) fn map_write_error(e: sqlx::Error, conflict: impl FnOnce() -> AppError) -> AppError {
    if let sqlx::Error::Database(db_error) = &e {
        if db_error.is_unique_violation() {
            return conflict();
        }
        if db_error.is_foreign_key_violation() {
            return referenced_error();
        }
    }
    AppError::Database(e)
}

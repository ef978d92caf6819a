//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, más las proyecciones que devuelve la API.

pub mod auth;
pub mod user;
pub mod vehicle;

pub use auth::{AuthenticatedUser, JwtClaims};
pub use user::{NewUser, User, UserChanges, UserResponse, UserRole};
pub use vehicle::{
    FuelType, NewVehicle, OwnerSummary, TransmissionType, Vehicle, VehicleChanges,
    VehicleResponse, VehicleType, VehicleWithOwner,
};

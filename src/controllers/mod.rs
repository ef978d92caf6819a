//! Controllers
//!
//! Lógica de cada recurso. Las rutas construyen el controller a partir
//! del `AppState` en cada request.

pub mod auth_controller;
pub mod user_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use user_controller::UserController;
pub use vehicle_controller::VehicleController;

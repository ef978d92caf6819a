//! Rental Admin API
//!
//! API HTTP del dashboard de administración de alquiler de vehículos:
//! usuarios, flota y ciclo de vida de las imágenes en el bucket.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;

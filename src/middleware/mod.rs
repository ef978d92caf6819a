//! Middleware del sistema
//!
//! Autenticación por JWT con guard de roles y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::{authorize, session_middleware, staff_auth_middleware};
pub use cors::cors_layer;

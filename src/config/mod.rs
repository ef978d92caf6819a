//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, almacenamiento,
//! variables de entorno y otras configuraciones del sistema.

pub mod database;
pub mod environment;
pub mod storage;

pub use database::DatabaseConfig;
pub use environment::*;
pub use storage::StorageConfig;

//! Services module
//!
//! Este módulo contiene los servicios que envuelven a los colaboradores
//! externos: emisión de sesiones, hashing de passwords y almacenamiento
//! de imágenes.

pub mod jwt_service;
pub mod password_service;
pub mod storage_service;

pub use jwt_service::JwtService;
pub use storage_service::{ObjectStorage, StorageError, SupabaseStorage};

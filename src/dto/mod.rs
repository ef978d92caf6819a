//! DTOs de entrada/salida de la API

pub mod auth_dto;
pub mod user_dto;
pub mod vehicle_dto;

use serde::{Deserialize, Serialize};

/// Respuesta simple con un mensaje de confirmación
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

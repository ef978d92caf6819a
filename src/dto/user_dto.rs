use serde::Deserialize;
use validator::Validate;

use crate::models::UserRole;

/// Request para crear un usuario desde el dashboard.
///
/// Todo es opcional a nivel de serde para poder responder 400 con un
/// mensaje propio cuando faltan email, password o role.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub password: Option<String>,
    pub role: Option<UserRole>,

    #[validate(length(max = 30))]
    pub phone_number: Option<String>,

    pub address: Option<String>,
    pub is_verified_by_admin: Option<bool>,
}

/// Request para actualizar un usuario existente
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    /// Vacío o ausente: se conserva el hash actual
    pub password: Option<String>,
    pub role: Option<UserRole>,

    #[validate(length(max = 30))]
    pub phone_number: Option<String>,

    pub address: Option<String>,
    pub is_verified_by_admin: Option<bool>,
}

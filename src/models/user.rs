//! Modelo de User
//!
//! Este módulo contiene el struct User que mapea a la tabla `users` y
//! la proyección pública que se devuelve por la API (sin password).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Customer,
    Owner,
    Admin,
}

impl UserRole {
    /// Roles con acceso al dashboard de administración
    pub const STAFF: [UserRole; 2] = [UserRole::Admin, UserRole::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "CUSTOMER",
            UserRole::Owner => "OWNER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(UserRole::Customer),
            "OWNER" => Ok(UserRole::Owner),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Fila de la tabla users. No implementa `Serialize`: el hash nunca sale del servidor.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub is_verified_by_admin: bool,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un usuario (password ya hasheado)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub is_verified_by_admin: bool,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Cambios parciales; `None` deja el valor actual
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_verified_by_admin: Option<bool>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Response de usuario para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub is_verified_by_admin: bool,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_verified_by_admin: user.is_verified_by_admin,
            phone_number: user.phone_number,
            address: user.address,
            image: user.image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Claims del JWT de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtClaims {
    pub sub: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub is_verified_by_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_verified_by_admin: bool,
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            is_verified_by_admin: claims.is_verified_by_admin,
        }
    }
}

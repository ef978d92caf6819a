//! Controller de autenticación
//!
//! Registro público de clientes y login con email/password que emite
//! el JWT de sesión usado por el resto de la API.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::{NewUser, UserResponse, UserRole};
use crate::repositories::UserRepository;
use crate::services::password_service::{hash_password, verify_password};
use crate::services::JwtService;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, validation_error, AppError, AppResult};

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt: state.jwt.clone(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| validation_error("email", "Email is required"))?;
        let password = request
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
            .ok_or_else(|| validation_error("password", "Password is required"))?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(conflict_error("User", "email"));
        }

        let password_hash = hash_password(password).await?;

        let user = self
            .users
            .create(NewUser {
                name: request.name.clone(),
                email: email.to_string(),
                password_hash: Some(password_hash),
                role: UserRole::Customer,
                is_verified_by_admin: false,
                phone_number: None,
                address: None,
            })
            .await?;

        info!("🆕 Registro de cliente: {}", user.email);
        Ok(user.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let Some(user) = self.users.find_by_email(request.email.trim()).await? else {
            warn!("🔒 Login con email desconocido");
            return Err(invalid_credentials());
        };

        let Some(password_hash) = user.password_hash.as_deref() else {
            warn!("🔒 Login sin password para {}", user.email);
            return Err(invalid_credentials());
        };

        if !verify_password(&request.password, password_hash).await? {
            warn!("🔒 Password incorrecto para {}", user.email);
            return Err(invalid_credentials());
        }

        let (token, expires_at) = self.jwt.issue(&user)?;

        info!("🔑 Sesión iniciada: {} ({})", user.email, user.role);
        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_at,
            user: user.into(),
        })
    }
}

//! Controller de usuarios
//!
//! CRUD administrativo de cuentas. El password siempre se hashea con
//! bcrypt antes de llegar al repositorio.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::dto::MessageResponse;
use crate::models::{NewUser, UserChanges, UserResponse};
use crate::repositories::UserRepository;
use crate::services::password_service::hash_password;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct UserController {
    users: Arc<dyn UserRepository>,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User"))?;

        Ok(user.into())
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let (Some(email), Some(password), Some(role)) =
            (request.email.as_deref(), request.password.as_deref(), request.role)
        else {
            return Err(AppError::BadRequest(
                "Email, password, and role are required".to_string(),
            ));
        };

        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Email, password, and role are required".to_string(),
            ));
        }

        request.validate()?;

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
                role,
                is_verified_by_admin: request.is_verified_by_admin.unwrap_or(false),
                phone_number: request.phone_number.clone(),
                address: request.address.clone(),
            })
            .await?;

        info!("👤 Usuario creado: {} ({})", user.email, user.role);
        Ok(user.into())
    }

    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let password_hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password).await?),
            _ => None,
        };

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            password_hash,
            role: request.role,
            is_verified_by_admin: request.is_verified_by_admin,
            phone_number: request.phone_number,
            address: request.address,
        };

        let user = self
            .users
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found_error("User"))?;

        info!("✏️ Usuario actualizado: {}", user.id);
        Ok(user.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        let user = self
            .users
            .delete(id)
            .await?
            .ok_or_else(|| not_found_error("User"))?;

        info!("🗑️ Usuario eliminado: {}", user.email);
        Ok(MessageResponse::new(format!(
            "User {} deleted successfully",
            user.email
        )))
    }
}

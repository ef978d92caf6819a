use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{map_write_error, UserRepository};
use crate::models::{NewUser, User, UserChanges};
use crate::utils::errors::{conflict_error, AppError, AppResult};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, is_verified_by_admin, \
     phone_number, address, image, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn email_conflict() -> AppError {
    conflict_error("User", "email")
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, is_verified_by_admin,
                phone_number, address, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .bind(user.is_verified_by_admin)
        .bind(user.phone_number)
        .bind(user.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email_conflict))?;

        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>> {
        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                is_verified_by_admin = COALESCE($6, is_verified_by_admin),
                phone_number = COALESCE($7, phone_number),
                address = COALESCE($8, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.role)
        .bind(changes.is_verified_by_admin)
        .bind(changes.phone_number)
        .bind(changes.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email_conflict))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<User>> {
        let deleted = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || AppError::Conflict("User could not be deleted".to_string()))
        })?;

        Ok(deleted)
    }
}

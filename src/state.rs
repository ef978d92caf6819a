//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los colaboradores externos se guardan
//! detrás de sus traits para poder sustituirlos en los tests.

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::repositories::{PgUserRepository, PgVehicleRepository, UserRepository, VehicleRepository};
use crate::services::{JwtService, ObjectStorage, SupabaseStorage};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: Arc<JwtService>,
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    /// Estado de producción: PostgreSQL + Supabase Storage
    pub fn new(pool: PgPool, http_client: Client, config: EnvironmentConfig) -> Self {
        let storage = SupabaseStorage::new(http_client, config.storage.clone());

        Self::with_collaborators(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgVehicleRepository::new(pool)),
            Arc::new(storage),
        )
    }

    pub fn with_collaborators(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            jwt: Arc::new(JwtService::from_config(&config)),
            config: Arc::new(config),
            users,
            vehicles,
            storage,
        }
    }
}

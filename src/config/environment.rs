//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

use anyhow::{bail, Context, Result};

use super::database::DatabaseConfig;
use super::storage::StorageConfig;
use crate::services::jwt_service::MAX_SESSION_SECONDS;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub jwt_secret: String,
    /// Duración de la sesión en segundos
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

/// 30 días, igual que la sesión del dashboard
const DEFAULT_JWT_EXPIRATION: u64 = 30 * 24 * 60 * 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            jwt_secret: "development-secret-change-me".to_string(),
            jwt_expiration: DEFAULT_JWT_EXPIRATION,
            cors_origins: Vec::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rechazar valores que no tienen sentido antes de arrancar
    pub fn validate(&self) -> Result<()> {
        if self.jwt_expiration == 0 || self.jwt_expiration > MAX_SESSION_SECONDS {
            bail!(
                "JWT_EXPIRATION must be between 1 and {} seconds",
                MAX_SESSION_SECONDS
            );
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Leer una variable numérica opcional
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

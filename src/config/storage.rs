//! Configuración del almacenamiento de imágenes (Supabase Storage)

use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// URL base del proyecto, p.ej. `https://xyz.supabase.co`
    pub base_url: String,
    pub service_role_key: String,
    pub bucket: String,
    pub cache_control: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            service_role_key: String::new(),
            bucket: "vehicle-images".to_string(),
            cache_control: "3600".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env::var("SUPABASE_URL")
                .context("SUPABASE_URL must be set")?
                .trim_end_matches('/')
                .to_string(),
            service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY must be set")?,
            bucket: env::var("STORAGE_BUCKET").unwrap_or(defaults.bucket),
            ..defaults
        })
    }
}

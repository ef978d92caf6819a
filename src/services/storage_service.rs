//! Almacenamiento de imágenes de vehículos
//!
//! `ObjectStorage` es la interfaz que consumen los controllers; la
//! implementación de producción habla con la API REST de Supabase Storage.
//!
//! Política de limpieza: los borrados de imágenes antiguas son *best-effort*.
//! Un fallo se registra con `warn!` y se descarta en [`delete_best_effort`];
//! nunca bloquea la operación sobre la base de datos.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Carpeta del bucket donde se guardan las imágenes de vehículos
pub const VEHICLE_IMAGE_FOLDER: &str = "vehicles";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("delete failed: {0}")]
    Delete(String),
}

/// Operaciones sobre el bucket de imágenes
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Sube un objeto y devuelve su URL pública
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Ruta relativa al bucket a partir de una URL pública propia
    fn object_path(&self, public_url: &str) -> Option<String>;
}

/// Genera una ruta única `vehicles/<uuid>.<ext>` para un archivo subido
pub fn image_object_path(folder: &str, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}/{}.{}", folder, Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => format!("{}/{}", folder, Uuid::new_v4()),
    }
}

/// Extrae la ruta dentro de `bucket` de una URL pública
pub fn object_path_in_bucket(public_url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/{}/", bucket);
    let (_, rest) = public_url.split_once(&marker)?;
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    if rest.is_empty() {
        return None;
    }
    urlencoding::decode(rest).ok().map(|path| path.into_owned())
}

/// Borra la imagen apuntada por `image_url` sin propagar errores.
///
/// El error se registra y se descarta a propósito: el objeto puede quedar
/// huérfano en el bucket.
pub async fn delete_best_effort(storage: &dyn ObjectStorage, image_url: &str, reason: &str) {
    let Some(path) = storage.object_path(image_url) else {
        warn!("⚠️ No se pudo extraer la ruta de la imagen ({}): {}", reason, image_url);
        return;
    };

    match storage.delete(&path).await {
        Ok(()) => debug!("🗑️ Imagen eliminada ({}): {}", reason, path),
        Err(e) => warn!("⚠️ Fallo al eliminar imagen ({}), se continúa: {} - {}", reason, path, e),
    }
}

/// Cliente de Supabase Storage
#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    config: StorageConfig,
}

impl SupabaseStorage {
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        info!("📤 Subiendo imagen {} ({} bytes)", path, bytes.len());

        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.config.service_role_key)
            .header("apikey", &self.config.service_role_key)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, format!("max-age={}", self.config.cache_control))
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload(format!("{} - {}", status, body)));
        }

        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.config.base_url, self.config.bucket
            ))
            .bearer_auth(&self.config.service_role_key)
            .header("apikey", &self.config.service_role_key)
            .json(&json!({ "prefixes": [path] }))
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Delete(format!("{} - {}", status, body)));
        }

        Ok(())
    }

    fn object_path(&self, public_url: &str) -> Option<String> {
        object_path_in_bucket(public_url, &self.config.bucket)
    }
}

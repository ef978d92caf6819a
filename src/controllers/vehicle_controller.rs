//! Controller de vehículos
//!
//! Además del CRUD, coordina el ciclo de vida de la imagen en el bucket:
//!
//! - Los efectos sobre el storage ocurren antes de escribir la fila.
//! - Si la escritura en la base de datos falla después de subir una imagen,
//!   el objeto recién subido se borra (best-effort).
//! - Los borrados de imágenes antiguas nunca hacen fallar la operación.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, ImageUpload, UpdateVehicleRequest};
use crate::dto::MessageResponse;
use crate::models::{NewVehicle, VehicleChanges, VehicleResponse};
use crate::repositories::VehicleRepository;
use crate::services::storage_service::{
    delete_best_effort, image_object_path, VEHICLE_IMAGE_FOLDER,
};
use crate::services::ObjectStorage;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            storage: state.storage.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.vehicles.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        Ok(vehicle.into())
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
        image: Option<ImageUpload>,
    ) -> AppResult<VehicleResponse> {
        if self
            .vehicles
            .find_by_license_plate(&request.license_plate)
            .await?
            .is_some()
        {
            return Err(conflict_error("Vehicle", "license plate"));
        }

        let image_url = match image {
            Some(image) => Some(self.upload(image).await?),
            None => None,
        };

        let new_vehicle = NewVehicle {
            make: request.make,
            model: request.model,
            year: request.year,
            license_plate: request.license_plate,
            rental_rate: request.rental_rate,
            daily_rate: request.daily_rate,
            late_fee_per_day: request.late_fee_per_day,
            description: request.description,
            is_available: request.is_available,
            vehicle_type: request.vehicle_type,
            capacity: request.capacity,
            transmission_type: request.transmission_type,
            fuel_type: request.fuel_type,
            city: request.city,
            address: request.address,
            image_url: image_url.clone(),
            owner_id,
        };

        let vehicle = match self.vehicles.create(new_vehicle).await {
            Ok(vehicle) => vehicle,
            Err(e) => {
                if let Some(url) = image_url {
                    delete_best_effort(self.storage.as_ref(), &url, "insert failed").await;
                }
                return Err(e);
            }
        };

        info!(
            "🚗 Vehículo creado: {} {} ({})",
            vehicle.make, vehicle.model, vehicle.license_plate
        );
        Ok(vehicle.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
        image: Option<ImageUpload>,
    ) -> AppResult<VehicleResponse> {
        let current = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?
            .vehicle;

        if let Some(plate) = request.license_plate.as_deref() {
            if plate != current.license_plate {
                let taken = self.vehicles.find_by_license_plate(plate).await?;
                if taken.is_some_and(|other| other.id != id) {
                    return Err(conflict_error("Vehicle", "license plate"));
                }
            }
        }

        let mut uploaded = None;
        let image_change = match (current.image_url.as_deref(), image) {
            (Some(old_url), _) if request.remove_existing_image => {
                delete_best_effort(self.storage.as_ref(), old_url, "image removed").await;
                Some(None)
            }
            (old_url, Some(image)) => {
                if let Some(old_url) = old_url {
                    delete_best_effort(self.storage.as_ref(), old_url, "image replaced").await;
                }
                let url = self.upload(image).await?;
                uploaded = Some(url.clone());
                Some(Some(url))
            }
            _ => None,
        };

        let changes = VehicleChanges {
            make: request.make,
            model: request.model,
            year: request.year,
            license_plate: request.license_plate,
            rental_rate: request.rental_rate,
            daily_rate: request.daily_rate,
            late_fee_per_day: request.late_fee_per_day,
            description: request.description,
            is_available: request.is_available,
            vehicle_type: request.vehicle_type,
            capacity: request.capacity,
            transmission_type: request.transmission_type,
            fuel_type: request.fuel_type,
            city: request.city,
            address: request.address,
            image_url: image_change,
        };

        let result = match self.vehicles.update(id, changes).await {
            Ok(Some(vehicle)) => Ok(vehicle),
            Ok(None) => Err(not_found_error("Vehicle")),
            Err(e) => Err(e),
        };

        match result {
            Ok(vehicle) => {
                info!("✏️ Vehículo actualizado: {}", vehicle.id);
                Ok(vehicle.into())
            }
            Err(e) => {
                if let Some(url) = uploaded {
                    delete_best_effort(self.storage.as_ref(), &url, "update failed").await;
                }
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?
            .vehicle;

        if let Some(url) = vehicle.image_url.as_deref() {
            delete_best_effort(self.storage.as_ref(), url, "vehicle deleted").await;
        }

        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }

        info!("🗑️ Vehículo eliminado: {} {}", vehicle.make, vehicle.model);
        Ok(MessageResponse::new(format!(
            "Vehicle {} {} deleted successfully",
            vehicle.make, vehicle.model
        )))
    }

    async fn upload(&self, image: ImageUpload) -> AppResult<String> {
        let path = image_object_path(VEHICLE_IMAGE_FOLDER, &image.file_name);

        self.storage
            .upload(&path, image.bytes, &image.content_type)
            .await
            .map_err(|e| {
                error!("❌ Error subiendo imagen {}: {}", path, e);
                AppError::from(e)
            })
    }
}

//! Formularios multipart de vehículos
//!
//! El dashboard envía los vehículos como `multipart/form-data` (texto +
//! imagen opcional). Aquí se leen los campos y se convierten a requests
//! tipados y validados.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use crate::models::{FuelType, TransmissionType, VehicleType};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Archivo recibido en el campo `image`
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Campos de texto y archivo de un formulario multipart
#[derive(Debug, Default)]
pub struct VehicleForm {
    fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl VehicleForm {
    /// Leer todo el cuerpo multipart. Un archivo vacío cuenta como ausente.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = VehicleForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;

                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    #[cfg(test)]
    fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Valor tal cual se recibió
    fn raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Valor recortado; vacío cuenta como ausente
    fn text(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn flag(&self, name: &str) -> Option<bool> {
        self.raw(name).map(|value| value.trim() == "true")
    }

    fn parse<T: FromStr>(
        &self,
        name: &'static str,
        message: &'static str,
    ) -> AppResult<Option<T>> {
        match self.text(name) {
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| validation_error(name, message)),
            None => Ok(None),
        }
    }

    pub fn remove_existing_image(&self) -> bool {
        self.flag("removeExistingImage").unwrap_or(false)
    }
}

const REQUIRED_FIELDS: [&str; 12] = [
    "make",
    "model",
    "year",
    "licensePlate",
    "rentalRate",
    "type",
    "capacity",
    "transmissionType",
    "fuelType",
    "dailyRate",
    "lateFeePerDay",
    "city",
];

/// Cuerpo por encima de `DefaultBodyLimit` → 413; el resto es un multipart mal formado
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(e.body_text());
    }
    AppError::BadRequest(e.body_text())
}

/// Las tarifas se guardan como `NUMERIC(12, 2)`
const RATE_SCALE: u32 = 2;
const RATE_LIMIT: i64 = 10_000_000_000;

fn rate_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_rate(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(rate_error("non_negative", "must not be negative"));
    }
    if value.normalize().scale() > RATE_SCALE {
        return Err(rate_error("scale", "must have at most 2 decimal places"));
    }
    if *value >= Decimal::from(RATE_LIMIT) {
        return Err(rate_error("range", "must be less than 10000000000"));
    }
    Ok(())
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Clone, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,

    #[validate(custom = "validate_rate")]
    pub rental_rate: Decimal,

    #[validate(custom = "validate_rate")]
    pub daily_rate: Decimal,

    #[validate(custom = "validate_rate")]
    pub late_fee_per_day: Decimal,

    pub description: Option<String>,
    pub is_available: bool,
    pub vehicle_type: VehicleType,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,

    pub transmission_type: TransmissionType,
    pub fuel_type: FuelType,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    pub address: Option<String>,
}

impl CreateVehicleRequest {
    pub fn from_form(form: &VehicleForm) -> AppResult<Self> {
        if REQUIRED_FIELDS.iter().any(|name| form.text(name).is_none()) {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }

        let request = Self {
            make: required(form.text("make"))?,
            model: required(form.text("model"))?,
            year: required(form.parse("year", "Year must be an integer")?)?,
            license_plate: required(form.text("licensePlate"))?,
            rental_rate: required(form.parse("rentalRate", "Rental rate must be a number")?)?,
            daily_rate: required(form.parse("dailyRate", "Daily rate must be a number")?)?,
            late_fee_per_day: required(
                form.parse("lateFeePerDay", "Late fee per day must be a number")?,
            )?,
            description: form.raw("description").map(str::to_string),
            is_available: form.flag("isAvailable").unwrap_or(false),
            vehicle_type: required(form.parse("type", "Unknown vehicle type")?)?,
            capacity: required(form.parse("capacity", "Capacity must be an integer")?)?,
            transmission_type: required(
                form.parse("transmissionType", "Unknown transmission type")?,
            )?,
            fuel_type: required(form.parse("fuelType", "Unknown fuel type")?)?,
            city: required(form.text("city"))?,
            address: form.raw("address").map(str::to_string),
        };

        request.validate()?;
        Ok(request)
    }
}

fn required<T>(value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))
}

/// Request para actualizar un vehículo; cada campo es opcional
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    #[validate(custom = "validate_rate")]
    pub rental_rate: Option<Decimal>,

    #[validate(custom = "validate_rate")]
    pub daily_rate: Option<Decimal>,

    #[validate(custom = "validate_rate")]
    pub late_fee_per_day: Option<Decimal>,

    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub vehicle_type: Option<VehicleType>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: Option<i32>,

    pub transmission_type: Option<TransmissionType>,
    pub fuel_type: Option<FuelType>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    pub address: Option<String>,
    pub remove_existing_image: bool,
}

impl UpdateVehicleRequest {
    pub fn from_form(form: &VehicleForm) -> AppResult<Self> {
        let request = Self {
            make: form.text("make"),
            model: form.text("model"),
            year: form.parse("year", "Year must be an integer")?,
            license_plate: form.text("licensePlate"),
            rental_rate: form.parse("rentalRate", "Rental rate must be a number")?,
            daily_rate: form.parse("dailyRate", "Daily rate must be a number")?,
            late_fee_per_day: form.parse("lateFeePerDay", "Late fee per day must be a number")?,
            description: form.raw("description").map(str::to_string),
            is_available: form.flag("isAvailable"),
            vehicle_type: form.parse("type", "Unknown vehicle type")?,
            capacity: form.parse("capacity", "Capacity must be an integer")?,
            transmission_type: form.parse("transmissionType", "Unknown transmission type")?,
            fuel_type: form.parse("fuelType", "Unknown fuel type")?,
            city: form.text("city"),
            address: form.raw("address").map(str::to_string),
            remove_existing_image: form.remove_existing_image(),
        };

        request.validate()?;
        Ok(request)
    }
}

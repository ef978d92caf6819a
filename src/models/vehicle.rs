//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Genera `FromStr` con el mismo nombre que usa la API (UPPERCASE)
macro_rules! impl_upper_from_str {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(format!("unknown value '{}'", other)),
                }
            }
        }
    };
}

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Suv,
    Mpv,
    Sedan,
    Hatchback,
    Sport,
    Truck,
    Motorcycle,
    Other,
}

impl_upper_from_str!(VehicleType {
    Suv => "SUV",
    Mpv => "MPV",
    Sedan => "SEDAN",
    Hatchback => "HATCHBACK",
    Sport => "SPORT",
    Truck => "TRUCK",
    Motorcycle => "MOTORCYCLE",
    Other => "OTHER",
});

/// Transmisión - mapea al ENUM transmission_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "transmission_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransmissionType {
    Manual,
    Automatic,
}

impl_upper_from_str!(TransmissionType {
    Manual => "MANUAL",
    Automatic => "AUTOMATIC",
});

/// Combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl_upper_from_str!(FuelType {
    Gasoline => "GASOLINE",
    Diesel => "DIESEL",
    Electric => "ELECTRIC",
    Hybrid => "HYBRID",
});

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub rental_rate: Decimal,
    pub daily_rate: Decimal,
    pub late_fee_per_day: Decimal,
    pub description: Option<String>,
    pub is_available: bool,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub transmission_type: TransmissionType,
    pub fuel_type: FuelType,
    pub city: String,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vehicle con el resumen del dueño (JOIN con users)
#[derive(Debug, Clone, FromRow)]
pub struct VehicleWithOwner {
    #[sqlx(flatten)]
    pub vehicle: Vehicle,
    pub owner_name: Option<String>,
    pub owner_email: String,
}

/// Datos para insertar un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub rental_rate: Decimal,
    pub daily_rate: Decimal,
    pub late_fee_per_day: Decimal,
    pub description: Option<String>,
    pub is_available: bool,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub transmission_type: TransmissionType,
    pub fuel_type: FuelType,
    pub city: String,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
}

/// Cambios parciales de un vehículo.
///
/// `image_url` distingue tres casos: `None` no toca la columna,
/// `Some(None)` la pone a NULL y `Some(Some(url))` la reemplaza.
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub rental_rate: Option<Decimal>,
    pub daily_rate: Option<Decimal>,
    pub late_fee_per_day: Option<Decimal>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<i32>,
    pub transmission_type: Option<TransmissionType>,
    pub fuel_type: Option<FuelType>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<Option<String>>,
}

/// Resumen del dueño embebido en las respuestas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rental_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub late_fee_per_day: Decimal,
    pub description: Option<String>,
    pub is_available: bool,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub transmission_type: TransmissionType,
    pub fuel_type: FuelType,
    pub city: String,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
            rental_rate: vehicle.rental_rate,
            daily_rate: vehicle.daily_rate,
            late_fee_per_day: vehicle.late_fee_per_day,
            description: vehicle.description,
            is_available: vehicle.is_available,
            vehicle_type: vehicle.vehicle_type,
            capacity: vehicle.capacity,
            transmission_type: vehicle.transmission_type,
            fuel_type: vehicle.fuel_type,
            city: vehicle.city,
            address: vehicle.address,
            image_url: vehicle.image_url,
            owner_id: vehicle.owner_id,
            owner: None,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

impl From<VehicleWithOwner> for VehicleResponse {
    fn from(row: VehicleWithOwner) -> Self {
        let owner = OwnerSummary {
            id: row.vehicle.owner_id,
            name: row.owner_name,
            email: row.owner_email,
        };
        let mut response = VehicleResponse::from(row.vehicle);
        response.owner = Some(owner);
        response
    }
}

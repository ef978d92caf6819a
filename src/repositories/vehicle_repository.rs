use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{map_write_error, VehicleRepository};
use crate::models::{NewVehicle, Vehicle, VehicleChanges, VehicleWithOwner};
use crate::utils::errors::{conflict_error, AppError, AppResult};

const VEHICLE_COLUMNS: &str = "id, make, model, year, license_plate, rental_rate, daily_rate, \
     late_fee_per_day, description, is_available, vehicle_type, capacity, transmission_type, \
     fuel_type, city, address, image_url, owner_id, created_at, updated_at";

const VEHICLE_WITH_OWNER_SELECT: &str = r#"
    SELECT
        v.id, v.make, v.model, v.year, v.license_plate, v.rental_rate, v.daily_rate,
        v.late_fee_per_day, v.description, v.is_available, v.vehicle_type, v.capacity,
        v.transmission_type, v.fuel_type, v.city, v.address, v.image_url, v.owner_id,
        v.created_at, v.updated_at,
        u.name AS owner_name, u.email AS owner_email
    FROM vehicles v
    JOIN users u ON u.id = v.owner_id
"#;

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn plate_conflict() -> AppError {
    conflict_error("Vehicle", "license plate")
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> AppResult<Vec<VehicleWithOwner>> {
        let vehicles = sqlx::query_as::<_, VehicleWithOwner>(&format!(
            "{} ORDER BY v.created_at DESC",
            VEHICLE_WITH_OWNER_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VehicleWithOwner>> {
        let vehicle = sqlx::query_as::<_, VehicleWithOwner>(&format!(
            "{} WHERE v.id = $1",
            VEHICLE_WITH_OWNER_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE license_plate = $1",
            VEHICLE_COLUMNS
        ))
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (
                id, make, model, year, license_plate, rental_rate, daily_rate,
                late_fee_per_day, description, is_available, vehicle_type, capacity,
                transmission_type, fuel_type, city, address, image_url, owner_id,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                NOW(), NOW()
            )
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.license_plate)
        .bind(vehicle.rental_rate)
        .bind(vehicle.daily_rate)
        .bind(vehicle.late_fee_per_day)
        .bind(vehicle.description)
        .bind(vehicle.is_available)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.capacity)
        .bind(vehicle.transmission_type)
        .bind(vehicle.fuel_type)
        .bind(vehicle.city)
        .bind(vehicle.address)
        .bind(vehicle.image_url)
        .bind(vehicle.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, plate_conflict))?;

        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        let (replace_image, image_url) = match changes.image_url {
            Some(url) => (true, url),
            None => (false, None),
        };

        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles SET
                make = COALESCE($2, make),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                license_plate = COALESCE($5, license_plate),
                rental_rate = COALESCE($6, rental_rate),
                daily_rate = COALESCE($7, daily_rate),
                late_fee_per_day = COALESCE($8, late_fee_per_day),
                description = COALESCE($9, description),
                is_available = COALESCE($10, is_available),
                vehicle_type = COALESCE($11, vehicle_type),
                capacity = COALESCE($12, capacity),
                transmission_type = COALESCE($13, transmission_type),
                fuel_type = COALESCE($14, fuel_type),
                city = COALESCE($15, city),
                address = COALESCE($16, address),
                image_url = CASE WHEN $17 THEN $18 ELSE image_url END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(changes.make)
        .bind(changes.model)
        .bind(changes.year)
        .bind(changes.license_plate)
        .bind(changes.rental_rate)
        .bind(changes.daily_rate)
        .bind(changes.late_fee_per_day)
        .bind(changes.description)
        .bind(changes.is_available)
        .bind(changes.vehicle_type)
        .bind(changes.capacity)
        .bind(changes.transmission_type)
        .bind(changes.fuel_type)
        .bind(changes.city)
        .bind(changes.address)
        .bind(replace_image)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, plate_conflict))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

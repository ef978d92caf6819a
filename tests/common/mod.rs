//! Dobles en memoria para los tests HTTP: repositorios con contador de
//! llamadas y un storage que registra cada operación y puede fallar a demanda.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header, HeaderValue};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestRequest, TestServer};
use chrono::{Duration, Utc};
use uuid::Uuid;

use rental_admin::config::EnvironmentConfig;
use rental_admin::models::{
    NewUser, NewVehicle, User, UserChanges, UserRole, Vehicle, VehicleChanges, VehicleWithOwner,
};
use rental_admin::repositories::{UserRepository, VehicleRepository};
use rental_admin::services::storage_service::object_path_in_bucket;
use rental_admin::services::{ObjectStorage, StorageError};
use rental_admin::utils::errors::{conflict_error, referenced_error, AppError, AppResult};
use rental_admin::{create_router, AppState};

pub const BUCKET: &str = "vehicle-images";
pub const STORAGE_BASE: &str = "https://storage.test/storage/v1/object/public";

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
    /// vehículo -> dueño, para rechazar borrados como la FK RESTRICT
    vehicle_owners: Mutex<HashMap<Uuid, Uuid>>,
    pub calls: AtomicUsize,
}

impl InMemoryUsers {
    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn register_vehicle(&self, vehicle_id: Uuid, owner_id: Uuid) {
        self.vehicle_owners.lock().unwrap().insert(vehicle_id, owner_id);
    }

    fn release_vehicle(&self, vehicle_id: Uuid) {
        self.vehicle_owners.lock().unwrap().remove(&vehicle_id);
    }

    fn owns_vehicles(&self, user_id: Uuid) -> bool {
        self.vehicle_owners
            .lock()
            .unwrap()
            .values()
            .any(|owner| *owner == user_id)
    }

    /// Inserta un usuario directamente, sin pasar por la API
    pub fn seed(&self, email: &str, role: UserRole, password_hash: Option<String>) -> User {
        // Cada seed es un poco más reciente que el anterior
        let offset = self.count() as i64;
        let now = Utc::now() + Duration::seconds(offset);
        let user = User {
            id: Uuid::new_v4(),
            name: Some(email.split('@').next().unwrap_or(email).to_string()),
            email: email.to_string(),
            password_hash,
            role,
            is_verified_by_admin: role != UserRole::Customer,
            phone_number: None,
            address: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list(&self) -> AppResult<Vec<User>> {
        self.touch();
        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.touch();
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.touch();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(conflict_error("User", "email"));
        }
        let now = Utc::now() + Duration::seconds(rows.len() as i64);
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_verified_by_admin: user.is_verified_by_admin,
            phone_number: user.phone_number,
            address: user.address,
            image: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<Option<User>> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        if let Some(email) = changes.email.as_deref() {
            if rows.iter().any(|u| u.email == email && u.id != id) {
                return Err(conflict_error("User", "email"));
            }
        }
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = Some(name);
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = Some(hash);
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(verified) = changes.is_verified_by_admin {
            user.is_verified_by_admin = verified;
        }
        if let Some(phone) = changes.phone_number {
            user.phone_number = Some(phone);
        }
        if let Some(address) = changes.address {
            user.address = Some(address);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<User>> {
        self.touch();
        if self.owns_vehicles(id) {
            return Err(referenced_error());
        }
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|u| u.id == id);
        Ok(position.map(|index| rows.remove(index)))
    }
}

pub struct InMemoryVehicles {
    rows: Mutex<Vec<Vehicle>>,
    users: Arc<InMemoryUsers>,
    pub calls: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl InMemoryVehicles {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
            calls: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_writes(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated write failure".to_string()));
        }
        Ok(())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Vehicle> {
        self.rows.lock().unwrap().iter().find(|v| v.id == id).cloned()
    }

    fn with_owner(&self, vehicle: Vehicle) -> VehicleWithOwner {
        let owner = self.users.get(vehicle.owner_id);
        VehicleWithOwner {
            owner_name: owner.as_ref().and_then(|u| u.name.clone()),
            owner_email: owner.map(|u| u.email).unwrap_or_default(),
            vehicle,
        }
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicles {
    async fn list(&self) -> AppResult<Vec<VehicleWithOwner>> {
        self.touch();
        let mut vehicles = self.rows.lock().unwrap().clone();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles.into_iter().map(|v| self.with_owner(v)).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VehicleWithOwner>> {
        self.touch();
        Ok(self.get(id).map(|v| self.with_owner(v)))
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        self.touch();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.license_plate == license_plate)
            .cloned())
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        self.touch();
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|v| v.license_plate == vehicle.license_plate) {
            return Err(conflict_error("Vehicle", "license plate"));
        }
        let now = Utc::now() + Duration::seconds(rows.len() as i64);
        let created = Vehicle {
            id: Uuid::new_v4(),
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
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        self.users.register_vehicle(created.id, created.owner_id);
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        self.touch();
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(plate) = changes.license_plate.as_deref() {
            if rows.iter().any(|v| v.license_plate == plate && v.id != id) {
                return Err(conflict_error("Vehicle", "license plate"));
            }
        }
        let Some(vehicle) = rows.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        if let Some(make) = changes.make {
            vehicle.make = make;
        }
        if let Some(model) = changes.model {
            vehicle.model = model;
        }
        if let Some(year) = changes.year {
            vehicle.year = year;
        }
        if let Some(plate) = changes.license_plate {
            vehicle.license_plate = plate;
        }
        if let Some(rate) = changes.rental_rate {
            vehicle.rental_rate = rate;
        }
        if let Some(rate) = changes.daily_rate {
            vehicle.daily_rate = rate;
        }
        if let Some(fee) = changes.late_fee_per_day {
            vehicle.late_fee_per_day = fee;
        }
        if let Some(description) = changes.description {
            vehicle.description = Some(description);
        }
        if let Some(available) = changes.is_available {
            vehicle.is_available = available;
        }
        if let Some(vehicle_type) = changes.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = changes.capacity {
            vehicle.capacity = capacity;
        }
        if let Some(transmission) = changes.transmission_type {
            vehicle.transmission_type = transmission;
        }
        if let Some(fuel) = changes.fuel_type {
            vehicle.fuel_type = fuel;
        }
        if let Some(city) = changes.city {
            vehicle.city = city;
        }
        if let Some(address) = changes.address {
            vehicle.address = Some(address);
        }
        if let Some(image_url) = changes.image_url {
            vehicle.image_url = image_url;
        }
        vehicle.updated_at = Utc::now();
        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.touch();
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|v| v.id != id);
        self.users.release_vehicle(id);
        Ok(rows.len() < before)
    }
}

/// Storage que registra uploads y deletes
#[derive(Default)]
pub struct RecordingStorage {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
    pub fail_upload: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl RecordingStorage {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn operations(&self) -> usize {
        self.uploads().len() + self.deletes().len()
    }

    pub fn public_url(path: &str) -> String {
        format!("{}/{}/{}", STORAGE_BASE, BUCKET, path)
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(StorageError::Upload("simulated upload failure".to_string()));
        }
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(Self::public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.deletes.lock().unwrap().push(path.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::Delete("simulated delete failure".to_string()));
        }
        Ok(())
    }

    fn object_path(&self, public_url: &str) -> Option<String> {
        object_path_in_bucket(public_url, BUCKET)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub users: Arc<InMemoryUsers>,
    pub vehicles: Arc<InMemoryVehicles>,
    pub storage: Arc<RecordingStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(EnvironmentConfig::default())
    }

    pub fn with_config(config: EnvironmentConfig) -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let vehicles = Arc::new(InMemoryVehicles::new(users.clone()));
        let storage = Arc::new(RecordingStorage::default());

        let state = AppState::with_collaborators(
            config,
            users.clone(),
            vehicles.clone(),
            storage.clone(),
        );
        let server = TestServer::new(create_router(state.clone())).unwrap();

        Self {
            server,
            state,
            users,
            vehicles,
            storage,
        }
    }

    /// Token de sesión para un usuario nuevo con `role`
    pub fn token_for(&self, role: UserRole) -> (User, String) {
        let email = format!("{}-{}@rental.test", role.as_str().to_lowercase(), Uuid::new_v4());
        let user = self.users.seed(&email, role, None);
        let (token, _) = self.state.jwt.issue(&user).unwrap();
        (user, token)
    }

    pub fn admin_token(&self) -> String {
        self.token_for(UserRole::Admin).1
    }
}

/// Añade `Authorization: Bearer <token>` a la request
pub fn with_token(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

/// Formulario completo de un vehículo válido
pub fn vehicle_form(license_plate: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("make", "Toyota")
        .add_text("model", "Avanza")
        .add_text("year", "2022")
        .add_text("licensePlate", license_plate)
        .add_text("rentalRate", "50")
        .add_text("type", "MPV")
        .add_text("capacity", "7")
        .add_text("transmissionType", "AUTOMATIC")
        .add_text("fuelType", "GASOLINE")
        .add_text("dailyRate", "75")
        .add_text("lateFeePerDay", "10")
        .add_text("city", "Jakarta")
        .add_text("isAvailable", "true")
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(vec![0x89, b'P', b'N', b'G', 1, 2, 3])
        .file_name(file_name)
        .mime_type("image/png")
}

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use super::parse_id;
use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleForm};
use crate::dto::MessageResponse;
use crate::models::{AuthenticatedUser, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<VehicleResponse>>> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VehicleResponse>> {
    let id = parse_id(&id, "Vehicle")?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<VehicleResponse>)> {
    let form = VehicleForm::from_multipart(multipart).await?;
    let request = CreateVehicleRequest::from_form(&form)?;

    let controller = VehicleController::new(&state);
    let vehicle = controller.create(user.user_id, request, form.image).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<VehicleResponse>> {
    let id = parse_id(&id, "Vehicle")?;
    let form = VehicleForm::from_multipart(multipart).await?;
    let request = UpdateVehicleRequest::from_form(&form)?;

    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(id, request, form.image).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Vehicle")?;
    let controller = VehicleController::new(&state);
    Ok(Json(controller.delete(id).await?))
}

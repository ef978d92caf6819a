use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::parse_id;
use crate::controllers::UserController;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::dto::MessageResponse;
use crate::models::UserResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let controller = UserController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id, "User")?;
    let controller = UserController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(request) = payload.map_err(AppError::from)?;
    let controller = UserController::new(&state);
    let user = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id, "User")?;
    let Json(request) = payload.map_err(AppError::from)?;
    let controller = UserController::new(&state);
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "User")?;
    let controller = UserController::new(&state);
    Ok(Json(controller.delete(id).await?))
}

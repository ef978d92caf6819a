use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, SessionResponse};
use crate::middleware::session_middleware;
use crate::models::{JwtClaims, UserResponse};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Configura las rutas de autenticación
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state, session_middleware)),
        )
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(request) = payload.map_err(AppError::from)?;
    let controller = AuthController::new(&state);
    let user = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(request) = payload.map_err(AppError::from)?;
    let controller = AuthController::new(&state);
    Ok(Json(controller.login(request).await?))
}

async fn me(Extension(claims): Extension<JwtClaims>) -> Json<SessionResponse> {
    Json(claims.into())
}

//! Router de la API
//!
//! `/health` y `/auth/register|login` son públicos; `/auth/me` exige una
//! sesión válida y todo `/users` y `/vehicles` exige un rol ADMIN u OWNER.

pub mod auth_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::{cors_layer, staff_auth_middleware};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

/// Construye el router completo con sus layers
pub fn create_router(state: AppState) -> Router {
    let staff_only = middleware::from_fn_with_state(state.clone(), staff_auth_middleware);

    let protected = Router::new()
        .nest("/users", user_routes::create_user_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .route_layer(staff_only);

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Un id que no es UUID no puede existir
pub(crate) fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found_error(resource))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token Bearer, su verificación y
//! el guard de roles que protege `/users` y `/vehicles`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::models::{AuthenticatedUser, JwtClaims, UserRole};
use crate::services::JwtService;
use crate::state::AppState;
use crate::utils::errors::{unauthorized_error, AppResult};

/// Cualquier sesión válida
const ANY_ROLE: [UserRole; 3] = [UserRole::Customer, UserRole::Owner, UserRole::Admin];

/// Guard de roles: solo pasa una sesión existente cuyo rol esté en `required`
pub fn authorize<'a>(
    session: Option<&'a AuthenticatedUser>,
    required: &[UserRole],
) -> AppResult<&'a AuthenticatedUser> {
    match session {
        Some(user) if required.contains(&user.role) => Ok(user),
        Some(user) => {
            debug!("🚫 Rol {} no autorizado para {:?}", user.role, required);
            Err(unauthorized_error())
        }
        None => Err(unauthorized_error()),
    }
}

/// Token del header `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Claims de la sesión; token ausente o inválido cuenta como sin sesión
fn resolve_session(jwt: &JwtService, headers: &HeaderMap) -> Option<JwtClaims> {
    let token = bearer_token(headers)?;
    match jwt.verify(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!("🔒 Token rechazado: {}", e);
            None
        }
    }
}

async fn require_roles(
    state: &AppState,
    required: &[UserRole],
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let claims = resolve_session(&state.jwt, request.headers());
    let session = claims.clone().map(AuthenticatedUser::from);
    let user = authorize(session.as_ref(), required)?.clone();

    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Solo ADMIN u OWNER
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    require_roles(&state, &UserRole::STAFF, request, next).await
}

/// Cualquier usuario con sesión válida
pub async fn session_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    require_roles(&state, &ANY_ROLE, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn session(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "staff@rental.id".to_string(),
            role,
            is_verified_by_admin: true,
        }
    }

    #[test]
    fn test_authorize_allows_staff_roles() {
        let admin = session(UserRole::Admin);
        let owner = session(UserRole::Owner);
        assert_eq!(authorize(Some(&admin), &UserRole::STAFF).unwrap(), &admin);
        assert_eq!(authorize(Some(&owner), &UserRole::STAFF).unwrap(), &owner);
    }

    #[test]
    fn test_authorize_rejects_customer_and_missing_session() {
        let customer = session(UserRole::Customer);
        assert!(authorize(Some(&customer), &UserRole::STAFF).is_err());
        assert!(authorize(None, &UserRole::STAFF).is_err());
        assert!(authorize(Some(&customer), &ANY_ROLE).is_ok());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::EnvironmentConfig;
use crate::models::{JwtClaims, User};
use crate::utils::errors::AppError;

/// Sesión más larga aceptada: 10 años
pub const MAX_SESSION_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Servicio JWT: emite y valida los tokens de sesión
pub struct JwtService {
    algorithm: Algorithm,
    session_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, session_seconds: u64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            session_duration: Duration::seconds(session_seconds.min(MAX_SESSION_SECONDS) as i64),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration)
    }

    /// Genera un token de sesión para el usuario
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_duration;

        let claims = JwtClaims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            is_verified_by_admin: user.is_verified_by_admin,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating token: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Valida y decodifica un token
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Invalid token: {}", e)))
    }
}

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tracing::{info, warn};

use shared_models::AppError;
use shared_state::AppState;

use crate::models::{Admin, AdminClaims, LoginRequest, LoginResponse};

// One uniform message for both unknown usernames and wrong passwords, so
// login probing cannot tell the cases apart.
const BAD_CREDENTIALS: &str = "Invalid username or password";

const SESSION_HOURS: i64 = 24;

pub struct AdminAuthService {
    pool: PgPool,
    jwt_secret: String,
}

impl AdminAuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            jwt_secret: state.config.admin_jwt_secret.clone(),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = $1",
        )
        .bind(&request.username)
        .fetch_optional(&self.pool)
        .await?;

        let admin = match admin {
            Some(admin) => admin,
            None => {
                warn!("Login attempt for unknown admin {:?}", request.username);
                return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(&request.password, &admin.password_hash)? {
            warn!("Failed login attempt for admin {:?}", admin.username);
            return Err(AppError::Auth(BAD_CREDENTIALS.to_string()));
        }

        let claims = AdminClaims {
            sub: admin.id,
            username: admin.username.clone(),
            exp: (Utc::now() + Duration::hours(SESSION_HOURS)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {e}")))?;

        info!("Admin {:?} logged in", admin.username);
        Ok(LoginResponse {
            success: true,
            token,
            username: admin.username,
        })
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("Password verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_internal_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}

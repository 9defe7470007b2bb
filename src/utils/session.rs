use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    error::{AppError, Result},
    models::SessionClaims,
};

pub const SESSION_COOKIE: &str = "session";

/// Signs and verifies the admin session token held in the session cookie.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
            .timestamp() as usize;

        let claims = SessionClaims {
            sub: username.to_string(),
            admin: true,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
    }

    /// Returns the claims of a well-signed, unexpired token.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| tracing::debug!("Rejected session token: {}", e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_as_admin() {
        let keys = SessionKeys::new("test-secret", 1);
        let token = keys.issue("admin").expect("issue");

        let claims = keys.verify(&token).expect("valid token");
        assert!(claims.admin);
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let token = SessionKeys::new("other-secret", 1).issue("admin").expect("issue");
        assert!(SessionKeys::new("test-secret", 1).verify(&token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("test-secret", -2);
        let token = keys.issue("admin").expect("issue");
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = SessionKeys::new("test-secret", 1);
        assert!(keys.verify("not-a-token").is_none());
    }
}

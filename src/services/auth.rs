use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    config::AuthConfig,
    error::Result,
    models::SessionClaims,
    utils::session::{SessionKeys, SESSION_COOKIE},
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Denied,
}

/// Single static admin credential plus the keys for its session cookie.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
    keys: SessionKeys,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.admin_username.clone(),
            password: config.admin_password.clone(),
            keys: SessionKeys::new(&config.session_secret, config.session_ttl_hours),
        }
    }

    pub fn attempt_login(&self, username: &str, password: &str) -> LoginOutcome {
        if username == self.username && password == self.password {
            LoginOutcome::Granted
        } else {
            LoginOutcome::Denied
        }
    }

    /// Verified admin claims from the session cookie, if any.
    pub fn session(&self, jar: &CookieJar) -> Option<SessionClaims> {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| self.keys.verify(cookie.value()))
            .filter(|claims| claims.admin)
    }

    pub fn is_admin(&self, jar: &CookieJar) -> bool {
        self.session(jar).is_some()
    }

    /// Adds a freshly signed admin session cookie to the jar.
    pub fn grant(&self, jar: CookieJar) -> Result<CookieJar> {
        let token = self.keys.issue(&self.username)?;

        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        Ok(jar.add(cookie))
    }

    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

use std::collections::HashSet;
use std::sync::RwLock;

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "kidzone_admin";

/// Password check and in-memory session store for the admin dashboard.
pub struct AdminAuth {
    password: Option<String>,
    sessions: RwLock<HashSet<String>>,
}

impl AdminAuth {
    /// With `None` every login attempt is rejected.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
            sessions: RwLock::new(HashSet::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    /// Check the password and open a session. Returns the session token.
    pub fn login(&self, password: &str) -> Result<String, AppError> {
        match &self.password {
            Some(expected) if expected == password => {}
            _ => return Err(AppError::Auth("Incorrect password".into())),
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .map_err(|_| AppError::Internal("Admin session store poisoned".into()))?
            .insert(token.clone());

        Ok(token)
    }

    pub fn logout(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains(token))
            .unwrap_or(false)
    }

    /// Whether the request's cookies carry a live admin session.
    pub fn has_session(&self, jar: &CookieJar) -> bool {
        jar.get(SESSION_COOKIE)
            .map(|cookie| self.is_valid(cookie.value()))
            .unwrap_or(false)
    }

    /// Reject the request unless it carries a live admin session.
    pub fn require(&self, jar: &CookieJar) -> Result<(), AppError> {
        if self.has_session(jar) {
            Ok(())
        } else {
            Err(AppError::Auth("Admin login required".into()))
        }
    }
}

/// Build the session cookie for a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Login / status response body.
#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub message: String,
    pub admin: bool,
}

/// `POST /api/auth/login`: admin login.
///
/// On success, sets the `kidzone_admin` cookie.
pub async fn login_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    jar: CookieJar,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<(CookieJar, axum::Json<AdminStatus>), AppError> {
    let token = state.admin_auth.login(&req.password).inspect_err(|_| {
        tracing::warn!("Rejected admin login attempt");
    })?;

    tracing::info!("Admin logged in");

    Ok((
        jar.add(session_cookie(token)),
        axum::Json(AdminStatus {
            message: "Login successful".to_string(),
            admin: true,
        }),
    ))
}

/// `GET /api/auth/me`: 200 when the caller holds a live admin session.
pub async fn me_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    jar: CookieJar,
) -> Result<axum::Json<AdminStatus>, AppError> {
    state.admin_auth.require(&jar)?;

    Ok(axum::Json(AdminStatus {
        message: "Logged in".to_string(),
        admin: true,
    }))
}

/// `POST /api/auth/logout`: drops the session and clears the cookie.
pub async fn logout_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    jar: CookieJar,
) -> CookieJar {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.admin_auth.logout(cookie.value());
    }

    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").removal().build();
    jar.remove(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_success_issues_valid_token() {
        let auth = AdminAuth::new(Some("admin123".to_string()));
        let token = auth.login("admin123").unwrap();
        assert!(auth.is_valid(&token));
    }

    #[test]
    fn test_wrong_password() {
        let auth = AdminAuth::new(Some("admin123".to_string()));
        match auth.login("guess") {
            Err(AppError::Auth(msg)) => assert_eq!(msg, "Incorrect password"),
            other => panic!("Expected Auth error, got: {:?}", other),
        }
    }

    #[test]
    fn test_disabled_without_password() {
        let auth = AdminAuth::new(None);
        assert!(!auth.is_enabled());
        assert!(auth.login("").is_err());

        let auth = AdminAuth::new(Some(String::new()));
        assert!(auth.login("").is_err());
    }

    #[test]
    fn test_logout_invalidates_token() {
        let auth = AdminAuth::new(Some("pw".to_string()));
        let token = auth.login("pw").unwrap();
        auth.logout(&token);
        assert!(!auth.is_valid(&token));
    }

    #[test]
    fn test_require_reads_cookie() {
        let auth = AdminAuth::new(Some("pw".to_string()));
        let token = auth.login("pw").unwrap();

        let jar = CookieJar::new().add(session_cookie(token));
        assert!(auth.require(&jar).is_ok());

        let jar = CookieJar::new().add(session_cookie("forged".to_string()));
        assert!(auth.require(&jar).is_err());
        assert!(auth.require(&CookieJar::new()).is_err());
    }

    #[test]
    fn test_tokens_are_unique() {
        let auth = AdminAuth::new(Some("pw".to_string()));
        let a = auth.login("pw").unwrap();
        let b = auth.login("pw").unwrap();
        assert_ne!(a, b);
        assert!(auth.is_valid(&a) && auth.is_valid(&b));
    }
}

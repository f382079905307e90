use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "sessionid";
const SESSION_KEY_MAX_LEN: usize = 40;
const SESSION_TTL_DAYS: i64 = 14;

/// Anonymous visitor key carried in the `sessionid` cookie.
///
/// A missing or malformed cookie gets a fresh key, which is written back on
/// the response. The database row is created lazily by the session service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn generate() -> Self {
        SessionKey(Uuid::new_v4().simple().to_string())
    }
}

pub fn is_valid_session_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= SESSION_KEY_MAX_LEN
        && key.chars().all(|c| c.is_ascii_alphanumeric())
}

impl<S> FromRequestParts<S> for SessionKey
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;

        if let Some(existing) = cookies.get(SESSION_COOKIE) {
            if is_valid_session_key(existing.value()) {
                return Ok(SessionKey(existing.value().to_string()));
            }
        }

        let key = SessionKey::generate();
        let secure = AppState::from_ref(state).config.secure_cookies;
        let cookie = Cookie::build((SESSION_COOKIE, key.0.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(Duration::days(SESSION_TTL_DAYS))
            .build();
        cookies.add(cookie);
        tracing::debug!(session_key = %key.0, "issued new session");

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_valid() {
        let key = SessionKey::generate();
        assert!(is_valid_session_key(key.as_str()));
        assert_eq!(key.as_str().len(), 32);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(!is_valid_session_key(""));
        assert!(!is_valid_session_key("has space"));
        assert!(!is_valid_session_key("a;b"));
        assert!(!is_valid_session_key(&"x".repeat(41)));
        assert!(is_valid_session_key(&"x".repeat(40)));
    }
}

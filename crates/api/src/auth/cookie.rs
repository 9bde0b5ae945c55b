//! Session cookie construction.
//!
//! The cookie carries the signed session token and nothing else. It is
//! always `HttpOnly` with `SameSite=Strict`; the `Secure` attribute follows
//! configuration so plain-HTTP local deployments keep working.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::AuthConfig;

/// Build the session cookie carrying a freshly signed token.
pub fn session_cookie(token: String, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(Duration::hours(config.session_expiry_hours))
        .build()
}

/// Build the name/path pair used to clear the session cookie on logout.
///
/// Clearing is the only logout mechanism: the token itself stays valid
/// until its natural expiry.
pub fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            cookie_name: "cauldron_session".to_string(),
            cookie_secure: false,
            session_expiry_hours: 24,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), &test_config());

        assert_eq!(cookie.name(), "cauldron_session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
    }

    #[test]
    fn test_secure_attribute_follows_config() {
        let config = AuthConfig {
            cookie_secure: true,
            ..test_config()
        };
        let cookie = session_cookie("tok".to_string(), &config);
        assert_eq!(cookie.secure(), Some(true));
    }
}

//! Session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! Validity is purely cryptographic and time-based: nothing is stored
//! server-side, so a token stays valid until its fixed expiry regardless of
//! logout.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's store id as a hex string.
    pub sub: String,
    /// The username at the time of login.
    pub username: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: &str,
    username: &str,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_hours * 3600;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-with-plenty-of-entropy".to_string(),
            cookie_name: "cauldron_session".to_string(),
            cookie_secure: false,
            session_expiry_hours: 24,
        }
    }

    #[test]
    fn test_token_round_trips_identity() {
        let config = test_config();
        let token = generate_session_token("64f1c0a2b3d4e5f60718293a", "morgana", &config)
            .expect("token generation should succeed");

        let claims =
            validate_session_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "64f1c0a2b3d4e5f60718293a");
        assert_eq!(claims.username, "morgana");
    }

    #[test]
    fn test_token_expiry_is_a_day_from_issuance() {
        let config = test_config();
        let token = generate_session_token("id", "user", &config)
            .expect("token generation should succeed");

        let claims =
            validate_session_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token, with a margin well
        // beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "id".to_string(),
            username: "user".to_string(),
            iat: now - 600,
            exp: now - 300,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_session_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_token_signed_with_other_secret_fails() {
        let config_a = test_config();
        let config_b = AuthConfig {
            jwt_secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token = generate_session_token("id", "user", &config_a)
            .expect("token generation should succeed");

        assert!(
            validate_session_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }
}

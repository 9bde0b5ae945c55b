/// Server configuration loaded from environment variables.
///
/// Fields without a default are required and fail startup loudly when
/// missing; everything else has a value suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// MongoDB connection string (required).
    pub mongo_uri: String,
    /// MongoDB database name (default: `cauldron`).
    pub mongo_db: String,
    /// Session token and cookie configuration.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `MONGO_URI`            | **required**            |
    /// | `MONGO_DB`             | `cauldron`              |
    ///
    /// # Panics
    ///
    /// Panics if `MONGO_URI` is unset or any numeric variable is malformed.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let mongo_uri =
            std::env::var("MONGO_URI").expect("MONGO_URI must be set in the environment");

        let mongo_db = std::env::var("MONGO_DB").unwrap_or_else(|_| "cauldron".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            mongo_uri,
            mongo_db,
            auth: AuthConfig::from_env(),
        }
    }
}

/// Session token and cookie configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub jwt_secret: String,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute. Off by default so
    /// plain-HTTP local deployments keep working; turn it on behind TLS.
    pub cookie_secure: bool,
    /// Session lifetime in hours, for both the token and the cookie.
    pub session_expiry_hours: i64,
}

/// Default session lifetime in hours.
const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default            |
    /// |-------------------------|----------|--------------------|
    /// | `JWT_SECRET`            | **yes**  | --                 |
    /// | `SESSION_COOKIE_NAME`   | no       | `cauldron_session` |
    /// | `SESSION_COOKIE_SECURE` | no       | `false`            |
    /// | `SESSION_EXPIRY_HOURS`  | no       | `24`               |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty. There is deliberately
    /// no built-in fallback secret.
    pub fn from_env() -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "cauldron_session".into());

        let cookie_secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        let session_expiry_hours: i64 = std::env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_HOURS must be a valid i64");

        Self {
            jwt_secret,
            cookie_name,
            cookie_secure,
            session_expiry_hours,
        }
    }
}

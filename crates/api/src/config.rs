use leadform_core::nonce::DEFAULT_LIFETIME_SECS;

use crate::auth::jwt::JwtConfig;

/// Anti-forgery token settings.
#[derive(Debug, Clone)]
pub struct NonceConfig {
    /// HMAC key for form tokens.
    pub secret: String,
    /// Token lifetime in seconds (default: one day).
    pub lifetime_secs: i64,
}

impl NonceConfig {
    /// Load token settings from the environment.
    ///
    /// | Env Var               | Required | Default  |
    /// |-----------------------|----------|----------|
    /// | `NONCE_SECRET`        | **yes**  | --       |
    /// | `NONCE_LIFETIME_SECS` | no       | `86400`  |
    ///
    /// # Panics
    ///
    /// Panics if `NONCE_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("NONCE_SECRET").expect("NONCE_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "NONCE_SECRET must not be empty");

        let lifetime_secs: i64 = std::env::var("NONCE_LIFETIME_SECS")
            .unwrap_or_else(|_| DEFAULT_LIFETIME_SECS.to_string())
            .parse()
            .expect("NONCE_LIFETIME_SECS must be a valid i64");

        Self {
            secret,
            lifetime_secs,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Anti-forgery token settings.
    pub nonce: NonceConfig,
    /// Admin access token settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
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

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            nonce: NonceConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}

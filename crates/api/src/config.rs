use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL used to build upload links (default derives from port).
    pub public_url: String,
    /// Directory uploaded files are written to (default: `uploads`).
    pub uploads_dir: String,
    /// Seconds between reminder passes (default: `3600`).
    pub reminder_check_interval_secs: u64,
    /// Seconds between Todoist pull syncs (default: `300`).
    pub todoist_sync_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                   |
    /// |--------------------------------|---------------------------|
    /// | `HOST`                         | `0.0.0.0`                 |
    /// | `PORT`                         | `3001`                    |
    /// | `CORS_ORIGINS`                 | `http://localhost:3000`   |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                      |
    /// | `PUBLIC_URL`                   | `http://localhost:<PORT>` |
    /// | `UPLOADS_DIR`                  | `uploads`                 |
    /// | `REMINDER_CHECK_INTERVAL_SECS` | `3600`                    |
    /// | `TODOIST_SYNC_INTERVAL_SECS`   | `300`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let uploads_dir = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".into());

        let reminder_check_interval_secs: u64 = std::env::var("REMINDER_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("REMINDER_CHECK_INTERVAL_SECS must be a valid u64");

        let todoist_sync_interval_secs: u64 = std::env::var("TODOIST_SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("TODOIST_SYNC_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_url,
            uploads_dir,
            reminder_check_interval_secs,
            todoist_sync_interval_secs,
            jwt,
        }
    }
}

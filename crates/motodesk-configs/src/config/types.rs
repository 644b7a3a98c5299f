use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub limits: LimitsSettings,
    #[serde(default, alias = "authentication")]
    pub auth: AuthSettings,
    #[serde(default)]
    pub loyalty: LoyaltySettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub shutdown: ShutdownSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Number of HTTP workers. 0 = one per CPU core.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl ServerSettings {
    /// Worker count with the 0 = auto convention resolved.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Parent directory is created at startup if missing.
    #[serde(default = "default_log_file_path")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file_path(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

/// Paging limits for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Page size applied when a list request carries no `limit`
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Hard cap: larger `limit` values are clamped to this
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Session token lifetime in hours (default: 12)
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Consecutive failed logins before the account locks (default: 5)
    #[serde(default = "default_max_failed_logins")]
    pub max_failed_logins: u32,

    /// Lockout duration in minutes once the failure cap is hit (default: 15)
    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: i64,

    /// Bcrypt cost factor (default: 12, range: 4-31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum password length (default: 8)
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Password for the seeded `admin` account when no users exist yet.
    /// The MOTODESK_ADMIN_PASSWORD env var takes precedence over this.
    #[serde(default)]
    pub default_admin_password: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            max_failed_logins: default_max_failed_logins(),
            lockout_minutes: default_lockout_minutes(),
            bcrypt_cost: default_bcrypt_cost(),
            min_password_length: default_min_password_length(),
            default_admin_password: None,
        }
    }
}

/// Loyalty program settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltySettings {
    /// Points earned per currency unit spent, before the tier multiplier
    /// (default: 1.0)
    #[serde(default = "default_points_per_currency_unit")]
    pub points_per_currency_unit: f64,
}

impl Default for LoyaltySettings {
    fn default() -> Self {
        Self {
            points_per_currency_unit: default_points_per_currency_unit(),
        }
    }
}

/// CORS configuration that maps directly to actix-cors options
/// See: https://docs.rs/actix-cors/latest/actix_cors/struct.Cors.html
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Use ["*"] for any origin, or specify exact origins.
    /// Empty list = same as ["*"] (allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods. Default: ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed HTTP headers. Use ["*"] for any header.
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Headers to expose to the browser. Default: []
    #[serde(default)]
    pub expose_headers: Vec<String>,

    /// Allow credentials (cookies, authorization headers). Default: true
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    /// Preflight cache max age in seconds. Default: 3600 (1 hour)
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(), // Empty = allow any
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            expose_headers: Vec::new(),
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

/// Shutdown settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownSettings {
    /// Seconds to wait for in-flight requests during graceful shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ShutdownSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_shutdown_timeout(),
        }
    }
}

/// Get default configuration (useful for testing)
impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 0,
            },
            logging: LoggingSettings::default(),
            limits: LimitsSettings::default(),
            auth: AuthSettings::default(),
            loyalty: LoyaltySettings::default(),
            cors: CorsSettings::default(),
            shutdown: ShutdownSettings::default(),
        }
    }
}

// Default value functions

pub fn default_workers() -> usize {
    0
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_file_path() -> String {
    "./logs/motodesk.log".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_page_size() -> usize {
    50
}

pub fn default_max_page_size() -> usize {
    1000
}

// Auth defaults

pub fn default_session_ttl_hours() -> i64 {
    12
}

pub fn default_max_failed_logins() -> u32 {
    5
}

pub fn default_lockout_minutes() -> i64 {
    15
}

/// Default bcrypt cost factor
pub fn default_bcrypt_cost() -> u32 {
    12
}

/// Default minimum password length
pub fn default_min_password_length() -> usize {
    8
}

// Loyalty defaults

pub fn default_points_per_currency_unit() -> f64 {
    1.0
}

// CORS defaults

pub fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "PATCH".to_string(),
        "OPTIONS".to_string(),
    ]
}

pub fn default_cors_headers() -> Vec<String> {
    vec![
        "Authorization".to_string(),
        "Content-Type".to_string(),
        "Accept".to_string(),
        "Origin".to_string(),
        "X-Requested-With".to_string(),
    ]
}

pub fn default_cors_max_age() -> u64 {
    3600 // 1 hour
}

pub fn default_shutdown_timeout() -> u64 {
    10
}

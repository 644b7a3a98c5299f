use super::types::ServerConfig;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file
    ///
    /// Environment variables take precedence over file values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for deployment-sensitive settings
    ///
    /// Supported environment variables:
    /// - MOTODESK_SERVER_HOST: Override server.host
    /// - MOTODESK_SERVER_PORT: Override server.port
    /// - MOTODESK_LOG_LEVEL: Override logging.level
    /// - MOTODESK_LOG_FILE: Override logging.file_path
    /// - MOTODESK_LOG_TO_CONSOLE: Override logging.log_to_console
    ///
    /// (MOTODESK_ADMIN_PASSWORD is read by user seeding, not here.)
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("MOTODESK_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("MOTODESK_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid MOTODESK_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(level) = env::var("MOTODESK_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("MOTODESK_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("MOTODESK_LOG_TO_CONSOLE") {
            self.logging.log_to_console =
                val.to_lowercase() == "true" || val == "1" || val.to_lowercase() == "yes";
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        // Validate port range
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        // Validate log level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        // Validate log format
        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        // Validate paging limits
        if self.limits.max_page_size == 0 {
            return Err(anyhow::anyhow!("max_page_size cannot be 0"));
        }

        if self.limits.default_page_size > self.limits.max_page_size {
            return Err(anyhow::anyhow!(
                "default_page_size ({}) cannot exceed max_page_size ({})",
                self.limits.default_page_size,
                self.limits.max_page_size
            ));
        }

        // Validate auth settings
        if self.auth.session_ttl_hours <= 0 {
            return Err(anyhow::anyhow!("session_ttl_hours must be positive"));
        }

        if self.auth.max_failed_logins == 0 {
            return Err(anyhow::anyhow!("max_failed_logins cannot be 0"));
        }

        if self.auth.lockout_minutes <= 0 {
            return Err(anyhow::anyhow!("lockout_minutes must be positive"));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "bcrypt_cost ({}) must be between 4 and 31",
                self.auth.bcrypt_cost
            ));
        }

        // Validate loyalty settings
        if !self.loyalty.points_per_currency_unit.is_finite()
            || self.loyalty.points_per_currency_unit < 0.0
        {
            return Err(anyhow::anyhow!(
                "points_per_currency_unit ({}) must be a non-negative number",
                self.loyalty.points_per_currency_unit
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = ServerConfig::default();
        config.logging.format = "pretty-print".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_size_cannot_exceed_max() {
        let mut config = ServerConfig::default();
        config.limits.default_page_size = 5000;
        config.limits.max_page_size = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_range() {
        let mut config = ServerConfig::default();
        config.auth.bcrypt_cost = 3;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = 32;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = 12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_points_rate_rejected() {
        let mut config = ServerConfig::default();
        config.loyalty.points_per_currency_unit = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override_server_host() {
        env::set_var("MOTODESK_SERVER_HOST", "0.0.0.0");
        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        env::remove_var("MOTODESK_SERVER_HOST");
    }

    #[test]
    fn test_env_override_server_port() {
        env::set_var("MOTODESK_SERVER_PORT", "9090");
        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.port, 9090);
        env::remove_var("MOTODESK_SERVER_PORT");
    }

    #[test]
    fn test_env_override_log_to_console() {
        env::set_var("MOTODESK_LOG_TO_CONSOLE", "false");
        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        assert!(!config.logging.log_to_console);
        env::remove_var("MOTODESK_LOG_TO_CONSOLE");

        env::set_var("MOTODESK_LOG_TO_CONSOLE", "1");
        config.apply_env_overrides().unwrap();
        assert!(config.logging.log_to_console);
        env::remove_var("MOTODESK_LOG_TO_CONSOLE");
    }

    #[test]
    fn test_from_file_minimal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 8750\n\n[auth]\nsession_ttl_hours = 2"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8750);
        assert_eq!(config.auth.session_ttl_hours, 2);
        // Sections left out fall back to defaults
        assert_eq!(config.limits.default_page_size, 50);
        assert_eq!(config.loyalty.points_per_currency_unit, 1.0);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nhost=").unwrap();
        assert!(ServerConfig::from_file(file.path()).is_err());
    }
}

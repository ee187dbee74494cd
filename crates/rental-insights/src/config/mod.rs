use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PROPERTIES_CSV: &str = "./technical-challenge-properties-september-2024.csv";
pub const DEFAULT_TENANTS_CSV: &str = "./technical-challenge-tenants-september-2024.csv";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level configuration shared by every utility.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let properties_csv = env_or_default("RENTAL_PROPERTIES_CSV", DEFAULT_PROPERTIES_CSV);
        let tenants_csv = env_or_default("RENTAL_TENANTS_CSV", DEFAULT_TENANTS_CSV);
        let log_level = env_or_default("APP_LOG_LEVEL", DEFAULT_LOG_LEVEL);

        let config = Self {
            data: DataConfig {
                properties_csv: PathBuf::from(properties_csv),
                tenants_csv: PathBuf::from(tenants_csv),
            },
            telemetry: TelemetryConfig { log_level },
        };
        config.data.validate()?;
        Ok(config)
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Locations of the CSV exports the utilities read.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub properties_csv: PathBuf,
    pub tenants_csv: PathBuf,
}

impl DataConfig {
    /// Applies command-line overrides, then re-checks the resulting paths.
    pub fn with_overrides(
        mut self,
        properties_csv: Option<PathBuf>,
        tenants_csv: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = properties_csv {
            self.properties_csv = path;
        }
        if let Some(path) = tenants_csv {
            self.tenants_csv = path;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.properties_csv.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                name: "properties CSV",
            });
        }
        if self.tenants_csv.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { name: "tenants CSV" });
        }
        Ok(())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { name } => write!(f, "{name} path must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("RENTAL_PROPERTIES_CSV");
        env::remove_var("RENTAL_TENANTS_CSV");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(
            config.data.properties_csv,
            PathBuf::from(DEFAULT_PROPERTIES_CSV)
        );
        assert_eq!(config.data.tenants_csv, PathBuf::from(DEFAULT_TENANTS_CSV));
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RENTAL_TENANTS_CSV", "   ");
        env::set_var("APP_LOG_LEVEL", "debug");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.data.tenants_csv, PathBuf::from(DEFAULT_TENANTS_CSV));
        assert_eq!(config.telemetry.log_level, "debug");
        reset_env();
    }

    #[test]
    fn overrides_replace_configured_paths() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RENTAL_PROPERTIES_CSV", "/data/properties.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.data.properties_csv,
            PathBuf::from("/data/properties.csv")
        );

        let data = config
            .data
            .with_overrides(None, Some(PathBuf::from("tenants.csv")))
            .expect("overrides apply");
        assert_eq!(data.properties_csv, PathBuf::from("/data/properties.csv"));
        assert_eq!(data.tenants_csv, PathBuf::from("tenants.csv"));
        reset_env();
    }

    #[test]
    fn empty_override_is_rejected() {
        let data = DataConfig {
            properties_csv: PathBuf::from(DEFAULT_PROPERTIES_CSV),
            tenants_csv: PathBuf::from(DEFAULT_TENANTS_CSV),
        };
        let error = data
            .with_overrides(Some(PathBuf::new()), None)
            .expect_err("empty path rejected");
        assert_eq!(error.to_string(), "properties CSV path must not be empty");
    }
}

//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Report generation settings.
    #[serde(default)]
    pub report: ReportSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a connection before the ledger counts as unavailable.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

/// Settings that shape report output.
///
/// The known lists never restrict aggregation. They only guarantee that those
/// entries are present, zero-filled, when the ledger has no matching records.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Absolute tolerance for reconciliation equality checks.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Payment methods always present in method breakdowns.
    #[serde(default = "default_known_methods")]
    pub known_methods: Vec<String>,
    /// Projects always present in project breakdowns.
    #[serde(default = "default_known_projects")]
    pub known_projects: Vec<String>,
    /// Locations always present in location summaries.
    #[serde(default = "default_known_locations")]
    pub known_locations: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            known_methods: default_known_methods(),
            known_projects: default_known_projects(),
            known_locations: default_known_locations(),
        }
    }
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_known_methods() -> Vec<String> {
    vec!["Banka Havalesi".into(), "Nakit".into(), "Çek".into()]
}

fn default_known_projects() -> Vec<String> {
    vec!["MKM".into(), "MSM".into()]
}

fn default_known_locations() -> Vec<String> {
    vec![
        "BANKA HAVALESİ".into(),
        "CARŞI".into(),
        "KUYUMCUKENT".into(),
        "OFİS".into(),
        "ÇEK".into(),
    ]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        layered_sources()?.try_deserialize()
    }
}

impl ReportSettings {
    /// Loads only the `report` section from the same sources as
    /// [`AppConfig::load`], falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the section is invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        match layered_sources()?.get::<Self>("report") {
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            result => result,
        }
    }
}

fn layered_sources() -> Result<config::Config, config::ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(config::Environment::with_prefix("TAHSILAT").separator("__"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_settings_defaults() {
        let settings = ReportSettings::default();
        assert_eq!(settings.tolerance, dec!(0.01));
        assert_eq!(settings.known_methods, ["Banka Havalesi", "Nakit", "Çek"]);
        assert_eq!(settings.known_projects, ["MKM", "MSM"]);
        assert_eq!(settings.known_locations.len(), 5);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TAHSILAT__DATABASE__URL", Some("postgres://localhost/tahsilat")),
                ("TAHSILAT__SERVER__PORT", Some("9090")),
                ("TAHSILAT__REPORT__TOLERANCE", Some("0.05")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/tahsilat");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.report.tolerance, dec!(0.05));
                assert_eq!(config.report.known_projects, ["MKM", "MSM"]);
            },
        );
    }

    #[test]
    fn test_report_settings_load_without_database() {
        temp_env::with_vars(
            [
                ("TAHSILAT__DATABASE__URL", None),
                ("TAHSILAT__REPORT__TOLERANCE", Some("0.5")),
            ],
            || {
                let settings = ReportSettings::load().unwrap();
                assert_eq!(settings.tolerance, dec!(0.5));
                assert_eq!(settings.known_methods, ["Banka Havalesi", "Nakit", "Çek"]);
            },
        );
    }

    #[test]
    fn test_report_settings_load_defaults() {
        temp_env::with_vars_unset(["TAHSILAT__REPORT__TOLERANCE"], || {
            let settings = ReportSettings::load().unwrap();
            assert_eq!(settings.tolerance, dec!(0.01));
        });
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_var_unset("TAHSILAT__DATABASE__URL", || {
            assert!(AppConfig::load().is_err());
        });
    }
}

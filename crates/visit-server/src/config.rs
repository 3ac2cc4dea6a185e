//! Server Configuration
//!
//! Read from the environment (after `.env` is loaded by the binary).

use std::path::PathBuf;

use visit_core::{ConfigError, Establishments};
use visit_qr::{QrTarget, DEFAULT_BASE_URL};

/// Runtime configuration for the visit server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Public base URL encoded in QR codes
    pub base_url: String,

    /// JSON file holding the visit counters
    pub data_file: PathBuf,

    /// Directory generated QR images are written to
    pub qr_codes_dir: PathBuf,

    /// What generated QR codes point at
    pub qr_target: QrTarget,

    /// Establishments allowed to receive visits
    pub establishments: Establishments,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".into(),
            base_url: DEFAULT_BASE_URL.into(),
            data_file: PathBuf::from("data.json"),
            qr_codes_dir: PathBuf::from("qr_codes"),
            qr_target: QrTarget::default(),
            establishments: Establishments::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let qr_target = match var("QR_TARGET") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "QR_TARGET".into(),
                value,
            })?,
            None => defaults.qr_target,
        };

        let establishments = match var("ESTABLISHMENTS") {
            Some(value) => Establishments::parse(&value)?,
            None => defaults.establishments,
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            base_url: var("BASE_URL").unwrap_or(defaults.base_url),
            data_file: var("DATA_FILE").map_or(defaults.data_file, PathBuf::from),
            qr_codes_dir: var("QR_CODES_DIR").map_or(defaults.qr_codes_dir, PathBuf::from),
            qr_target,
            establishments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert_eq!(config.qr_target, QrTarget::StaticPage);
        assert_eq!(config.establishments.len(), 8);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BASE_URL", "https://promo.example.com"),
            ("QR_TARGET", "visit"),
            ("ESTABLISHMENTS", "cafe_1,bar_2"),
            ("DATA_FILE", "/var/lib/visits/data.json"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://promo.example.com");
        assert_eq!(config.qr_target, QrTarget::Visit);
        assert_eq!(config.establishments.iter().collect::<Vec<_>>(), vec!["cafe_1", "bar_2"]);
        assert_eq!(config.data_file, PathBuf::from("/var/lib/visits/data.json"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("BASE_URL", "  ")])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_invalid_target() {
        let err = ServerConfig::from_lookup(lookup(&[("QR_TARGET", "banner")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "QR_TARGET".into(),
                value: "banner".into(),
            }
        );
    }

    #[test]
    fn test_empty_establishments() {
        let err = ServerConfig::from_lookup(lookup(&[("ESTABLISHMENTS", ",,")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyEstablishments);
    }
}

//! Storefront configuration, read from the environment.
//!
//! | variable                    | default        |
//! |-----------------------------|----------------|
//! | `BASECAMP_APPLICATION_NAME` | `AEPSampleApp` |
//! | `BASECAMP_PAYMENT_METHOD`   | `credit card`  |
//! | `BASECAMP_STORE_PATH`       | unset (memory) |
//! | `BASECAMP_LOG_FORMAT`       | `json`         |

use std::path::PathBuf;

use basecamp_observability::LogFormat;

pub const DEFAULT_APPLICATION_NAME: &str = "AEPSampleApp";
pub const DEFAULT_PAYMENT_METHOD: &str = "credit card";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Reported as `application.name` / `application` on tracked calls.
    pub application_name: String,
    /// Reported as `payment.method` on `payNow`.
    pub payment_method: String,
    /// File-backed key-value store location; in-memory when `None`.
    pub store_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            store_path: None,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Only the log format, so logging can be installed before the rest of
    /// the configuration is read and its fallbacks logged.
    pub fn log_format_from_env() -> LogFormat {
        Self::log_format_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn log_format_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LogFormat {
        lookup("BASECAMP_LOG_FORMAT")
            .filter(|v| !v.trim().is_empty())
            .map(|v| LogFormat::from_name(&v))
            .unwrap_or(LogFormat::Json)
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let application_name = get("BASECAMP_APPLICATION_NAME").unwrap_or_else(|| {
            tracing::debug!("BASECAMP_APPLICATION_NAME not set; using {DEFAULT_APPLICATION_NAME}");
            defaults.application_name
        });

        let payment_method = get("BASECAMP_PAYMENT_METHOD").unwrap_or_else(|| {
            tracing::debug!("BASECAMP_PAYMENT_METHOD not set; using {DEFAULT_PAYMENT_METHOD}");
            defaults.payment_method
        });

        let store_path = get("BASECAMP_STORE_PATH").map(PathBuf::from);
        if store_path.is_none() {
            tracing::warn!("BASECAMP_STORE_PATH not set; profile storage is in-memory only");
        }

        let log_format = Self::log_format_from_lookup(&lookup);

        Self {
            application_name,
            payment_method,
            store_path,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(StorefrontConfig::from_lookup(lookup(&[])), StorefrontConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BASECAMP_APPLICATION_NAME", "Basecamp"),
            ("BASECAMP_PAYMENT_METHOD", "gift card"),
            ("BASECAMP_STORE_PATH", "/tmp/basecamp.json"),
            ("BASECAMP_LOG_FORMAT", "pretty"),
        ]));

        assert_eq!(config.application_name, "Basecamp");
        assert_eq!(config.payment_method, "gift card");
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/basecamp.json")));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn log_format_is_readable_on_its_own() {
        let pretty = lookup(&[("BASECAMP_LOG_FORMAT", "pretty")]);
        assert_eq!(StorefrontConfig::log_format_from_lookup(&pretty), LogFormat::Pretty);
        assert_eq!(StorefrontConfig::from_lookup(&pretty).log_format, LogFormat::Pretty);
        assert_eq!(StorefrontConfig::log_format_from_lookup(lookup(&[])), LogFormat::Json);
    }

    #[test]
    fn blank_values_fall_back() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BASECAMP_APPLICATION_NAME", "  "),
            ("BASECAMP_PAYMENT_METHOD", ""),
        ]));
        assert_eq!(config.application_name, DEFAULT_APPLICATION_NAME);
        assert_eq!(config.payment_method, DEFAULT_PAYMENT_METHOD);
    }
}

//! Cache configuration.
//!
//! Controls the memo cache via the `[cache]` section of `digest.toml`.

use serde::Deserialize;

/// Cache configuration from `digest.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Keep computed values for the lifetime of the process.
    pub enabled: bool,
    /// Log every hit and miss at debug level.
    pub debug: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            debug: settings.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert!(!config.debug);
    }

    #[test]
    fn from_settings_copies_flags() {
        let settings = crate::config::CacheSettings {
            enabled: false,
            debug: true,
        };
        let config = CacheConfig::from(&settings);
        assert!(!config.enabled);
        assert!(config.debug);
    }
}

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// Metric ranges, all half-open [base, base + span)
pub const SPEED_GBPS_BASE: f64 = 45.0;
pub const SPEED_GBPS_SPAN: f64 = 15.0;
pub const UPTIME_PERCENT_BASE: f64 = 99.85;
pub const UPTIME_PERCENT_SPAN: f64 = 0.14;
pub const SERVER_COUNT_BASE: u32 = 1247;
pub const SERVER_COUNT_SPAN: u32 = 100;
pub const ACTIVE_USERS_BASE: u64 = 12_500_000;
pub const ACTIVE_USERS_SPAN: u64 = 1_000_000;

// Timing constants
pub const INITIAL_DELAY_MS: u64 = 500;     // Lets the loading state render first
pub const UPDATE_PERIOD_MS: u64 = 5000;
pub const DEMO_RUNTIME_SECS: u64 = 12;

/// Which source the device summary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Independently seeded demo numbers.
    #[default]
    Static,
    /// Aggregated live over the device list.
    Derived,
}

/// Runtime configuration for a live-stats panel and the demo binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub initial_delay_ms: u64,
    pub update_period_ms: u64,
    pub runtime_secs: u64,
    pub summary_mode: SummaryMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: INITIAL_DELAY_MS,
            update_period_ms: UPDATE_PERIOD_MS,
            runtime_secs: DEMO_RUNTIME_SECS,
            summary_mode: SummaryMode::Static,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; missing fields fall back to the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // tokio intervals panic on a zero period
        if self.update_period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.update_period_ms)
    }

    pub fn runtime(&self) -> Duration {
        Duration::from_secs(self.runtime_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = SimConfig::default();
        assert_eq!(config.initial_delay(), Duration::from_millis(500));
        assert_eq!(config.update_period(), Duration::from_millis(5000));
        assert_eq!(config.summary_mode, SummaryMode::Static);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "update_period_ms": 1000, "summary_mode": "derived" }"#)
            .unwrap();
        assert_eq!(config.update_period_ms, 1000);
        assert_eq!(config.initial_delay_ms, INITIAL_DELAY_MS);
        assert_eq!(config.summary_mode, SummaryMode::Derived);
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = SimConfig::from_json_str(r#"{ "update_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPeriod));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::load("/nonexistent/vpn-live-stats.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One synthetic sample of network health.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub speed_gbps: f64,
    pub uptime_percent: f64,
    pub server_count: u32,
    pub active_users: u64,
}

/// Display strings derived 1:1 from a [`MetricsSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub speed_label: String,
    pub uptime_label: String,
    pub servers_label: String,
    pub users_label: String,
}

/// What a live-stats panel is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "snapshot", rename_all = "lowercase")]
pub enum PanelState {
    Loading,
    Ready(DisplaySnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
    /// Any status string this crate does not recognise.
    #[serde(other)]
    Unknown,
}

impl FromStr for DeviceStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "online" => DeviceStatus::Online,
            "offline" => DeviceStatus::Offline,
            "warning" => DeviceStatus::Warning,
            _ => DeviceStatus::Unknown,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityState {
    Secure,
    Vulnerable,
    Protected,
}

impl SecurityState {
    pub fn is_secure(self) -> bool {
        !matches!(self, SecurityState::Vulnerable)
    }
}

/// Device category. Icon choice for each kind belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Camera,
    Thermostat,
    Lock,
    Speaker,
    Television,
    Wearable,
    Phone,
    Laptop,
}

/// Semantic color identifier, resolved to a concrete color by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Positive,
    Negative,
    Caution,
    Neutral,
}

impl ColorToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Positive => "positive",
            ColorToken::Negative => "negative",
            ColorToken::Caution => "caution",
            ColorToken::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoTDevice {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub security: SecurityState,
    pub last_seen: String,
    pub data_usage_mb: u64,
    // Only battery-powered devices report this
    pub battery_level_percent: Option<u8>,
    // Only climate devices report this
    pub temperature_celsius: Option<i16>,
    pub is_protected: bool,
}

/// Aggregate counts shown above the device dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub total_devices: usize,
    pub online_devices: usize,
    pub secure_devices: usize,
    pub data_transferred_mb: u64,
    pub threats_blocked: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("online".parse::<DeviceStatus>().unwrap(), DeviceStatus::Online);
        assert_eq!("warning".parse::<DeviceStatus>().unwrap(), DeviceStatus::Warning);
        assert_eq!("bogus".parse::<DeviceStatus>().unwrap(), DeviceStatus::Unknown);
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: DeviceStatus = serde_json::from_str("\"rebooting\"").unwrap();
        assert_eq!(status, DeviceStatus::Unknown);
    }

    #[test]
    fn test_panel_state_json() {
        let json = serde_json::to_string(&PanelState::Loading).unwrap();
        assert_eq!(json, r#"{"state":"loading"}"#);
    }

    #[test]
    fn test_security_classification() {
        assert!(SecurityState::Secure.is_secure());
        assert!(SecurityState::Protected.is_secure());
        assert!(!SecurityState::Vulnerable.is_secure());
    }
}

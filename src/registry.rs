use crate::config::SummaryMode;
use crate::error::RegistryError;
use crate::types::{ColorToken, DeviceKind, DeviceStatus, IoTDevice, NetworkSummary, SecurityState};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::warn;

/// Devices the dashboard starts with.
pub static SEEDED_DEVICES: Lazy<Vec<IoTDevice>> = Lazy::new(seed_devices);

/// Summary numbers seeded alongside the device list, not derived from it.
pub static SEEDED_SUMMARY: NetworkSummary = NetworkSummary {
    total_devices: 8,
    online_devices: 6,
    secure_devices: 7,
    data_transferred_mb: 16_384,
    threats_blocked: 1_247,
};

/// Map a device status to the semantic color the dashboard shows it in.
pub fn status_color(status: DeviceStatus) -> ColorToken {
    match status {
        DeviceStatus::Online => ColorToken::Positive,
        DeviceStatus::Offline => ColorToken::Negative,
        DeviceStatus::Warning => ColorToken::Caution,
        DeviceStatus::Unknown => ColorToken::Neutral,
    }
}

/// Same lookup for raw status strings; unrecognised values come back neutral.
pub fn status_color_str(raw: &str) -> ColorToken {
    match raw.parse::<DeviceStatus>() {
        Ok(status) => status_color(status),
        Err(never) => match never {},
    }
}

impl NetworkSummary {
    pub fn seeded() -> Self {
        SEEDED_SUMMARY
    }

    /// Aggregate over a device list. Devices don't record blocked threats, so
    /// that count is carried over from the caller.
    pub fn aggregate(devices: &[IoTDevice], threats_blocked: u64) -> Self {
        Self {
            total_devices: devices.len(),
            online_devices: devices.iter().filter(|d| d.status == DeviceStatus::Online).count(),
            secure_devices: devices.iter().filter(|d| d.security.is_secure()).count(),
            data_transferred_mb: devices.iter().map(|d| d.data_usage_mb).sum(),
            threats_blocked,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<IoTDevice>,
}

impl DeviceRegistry {
    pub fn new(devices: Vec<IoTDevice>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(devices.len());
        for device in &devices {
            if !seen.insert(device.id.as_str()) {
                return Err(RegistryError::DuplicateId(device.id.clone()));
            }
            if let Some(level) = device.battery_level_percent {
                if level > 100 {
                    return Err(RegistryError::BatteryOutOfRange {
                        id: device.id.clone(),
                        level,
                    });
                }
            }
        }
        Ok(Self { devices })
    }

    pub fn seeded() -> Self {
        Self {
            devices: SEEDED_DEVICES.clone(),
        }
    }

    pub fn devices(&self) -> &[IoTDevice] {
        &self.devices
    }

    pub fn get(&self, id: &str) -> Option<&IoTDevice> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn summary(&self, mode: SummaryMode) -> NetworkSummary {
        match mode {
            SummaryMode::Static => NetworkSummary::seeded(),
            SummaryMode::Derived => NetworkSummary::aggregate(&self.devices, SEEDED_SUMMARY.threats_blocked),
        }
    }

    /// Names of the summary fields where the seeded numbers disagree with a
    /// live aggregation over this registry.
    pub fn consistency_gaps(&self) -> Vec<&'static str> {
        let seeded = NetworkSummary::seeded();
        let live = self.summary(SummaryMode::Derived);

        let mut gaps = Vec::new();
        if seeded.total_devices != live.total_devices {
            gaps.push("total_devices");
        }
        if seeded.online_devices != live.online_devices {
            gaps.push("online_devices");
        }
        if seeded.secure_devices != live.secure_devices {
            gaps.push("secure_devices");
        }
        if seeded.data_transferred_mb != live.data_transferred_mb {
            gaps.push("data_transferred_mb");
        }

        if !gaps.is_empty() {
            warn!("⚠️ Seeded summary out of sync with device list: {}", gaps.join(", "));
        }
        gaps
    }
}

fn device(
    id: &str,
    name: &str,
    kind: DeviceKind,
    status: DeviceStatus,
    security: SecurityState,
    last_seen: &str,
    data_usage_mb: u64,
) -> IoTDevice {
    IoTDevice {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        status,
        security,
        last_seen: last_seen.to_string(),
        data_usage_mb,
        battery_level_percent: None,
        temperature_celsius: None,
        is_protected: security != SecurityState::Vulnerable,
    }
}

fn seed_devices() -> Vec<IoTDevice> {
    use DeviceKind::*;
    use DeviceStatus::*;
    use SecurityState::*;

    vec![
        IoTDevice {
            temperature_celsius: Some(22),
            ..device("dev-001", "Living Room Thermostat", Thermostat, Online, Protected, "Just now", 128)
        },
        device("dev-002", "Front Door Camera", Camera, Online, Secure, "2 min ago", 4_352),
        IoTDevice {
            battery_level_percent: Some(78),
            ..device("dev-003", "Smart Lock", Lock, Online, Protected, "5 min ago", 24)
        },
        device("dev-004", "Kitchen Speaker", Speaker, Warning, Vulnerable, "12 min ago", 896),
        device("dev-005", "Bedroom TV", Television, Offline, Secure, "3 hours ago", 6_144),
        IoTDevice {
            battery_level_percent: Some(45),
            ..device("dev-006", "Fitness Band", Wearable, Online, Protected, "1 min ago", 64)
        },
        IoTDevice {
            battery_level_percent: Some(91),
            ..device("dev-007", "Work Phone", Phone, Online, Secure, "Just now", 2_560)
        },
        device("dev-008", "Home Office Laptop", Laptop, Online, Protected, "8 min ago", 2_216),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(DeviceStatus::Online), ColorToken::Positive);
        assert_eq!(status_color(DeviceStatus::Offline), ColorToken::Negative);
        assert_eq!(status_color(DeviceStatus::Warning), ColorToken::Caution);
        assert_eq!(status_color_str("online"), ColorToken::Positive);
        assert_eq!(status_color_str("bogus"), ColorToken::Neutral);
        assert_eq!(status_color_str("bogus").as_str(), "neutral");
    }

    #[test]
    fn test_seeded_ids_unique() {
        let ids: HashSet<&str> = SEEDED_DEVICES.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), SEEDED_DEVICES.len());
        assert!(DeviceRegistry::new(SEEDED_DEVICES.clone()).is_ok());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut devices = SEEDED_DEVICES.clone();
        devices.push(devices[0].clone());
        let err = DeviceRegistry::new(devices).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("dev-001".to_string()));
    }

    #[test]
    fn test_battery_above_100_rejected() {
        let mut devices = SEEDED_DEVICES.clone();
        devices[2].battery_level_percent = Some(120);
        assert!(matches!(
            DeviceRegistry::new(devices),
            Err(RegistryError::BatteryOutOfRange { level: 120, .. })
        ));
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = DeviceRegistry::seeded();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.get("dev-003").map(|d| d.kind), Some(DeviceKind::Lock));
        assert!(registry.get("dev-999").is_none());
    }

    #[test]
    fn test_seed_matches_live_aggregation() {
        let registry = DeviceRegistry::seeded();
        assert_eq!(registry.summary(SummaryMode::Derived), registry.summary(SummaryMode::Static));
        assert!(registry.consistency_gaps().is_empty());
    }

    #[test]
    fn test_gap_reported_when_list_changes() {
        let mut devices = SEEDED_DEVICES.clone();
        devices.retain(|d| d.status != DeviceStatus::Offline);
        let registry = DeviceRegistry::new(devices).unwrap();

        // Static summary keeps its numbers, derived one follows the list
        assert_eq!(registry.summary(SummaryMode::Static).total_devices, 8);
        assert_eq!(registry.summary(SummaryMode::Derived).total_devices, 7);
        assert_eq!(
            registry.consistency_gaps(),
            vec!["total_devices", "secure_devices", "data_transferred_mb"]
        );
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = NetworkSummary::aggregate(&[], 0);
        assert_eq!(summary.total_devices, 0);
        assert_eq!(summary.data_transferred_mb, 0);
    }
}

//! Synthetic network telemetry for a VPN live-stats panel.
//!
//! A [`generator`] draws raw [`MetricsSnapshot`]s, the [`formatter`] turns
//! them into display labels, and a [`schedule`] drives both on a
//! delayed-then-repeating timer with an explicit cancel handle. The
//! [`registry`] holds the seeded IoT device list and the status color lookup.

pub mod config;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod metrics;
pub mod panel;
pub mod registry;
pub mod schedule;
pub mod types;

pub use config::{SimConfig, SummaryMode};
pub use error::{ConfigError, RegistryError};
pub use formatter::{format, format_data_usage};
pub use generator::generate;
pub use metrics::ScheduleMetrics;
pub use panel::LiveStatsPanel;
pub use registry::{status_color, status_color_str, DeviceRegistry, SEEDED_DEVICES, SEEDED_SUMMARY};
pub use schedule::{start_schedule, start_schedule_with_metrics, CancelHandle};
pub use types::{
    ColorToken, DeviceKind, DeviceStatus, DisplaySnapshot, IoTDevice, MetricsSnapshot, NetworkSummary,
    PanelState, SecurityState,
};

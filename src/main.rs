use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vpn_live_stats::{
    format_data_usage, status_color, DeviceRegistry, LiveStatsPanel, PanelState, ScheduleMetrics, SimConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => SimConfig::default(),
    };

    info!("🚀 Starting VPN live stats");

    let registry = DeviceRegistry::seeded();
    print_dashboard(&registry, &config);

    let shutdown = Arc::new(Notify::new());
    let metrics = ScheduleMetrics::new();
    let panel = LiveStatsPanel::mount_with_metrics(&config, metrics.clone());

    let viewer = tokio::spawn({
        let state_rx = panel.subscribe();
        let shutdown = shutdown.clone();
        async move { viewer_task(state_rx, shutdown).await }
    });

    info!("⏰ Running for {} seconds...", config.runtime_secs);
    sleep(config.runtime()).await;

    info!("🛑 Tearing down panel");
    panel.unmount().await;
    shutdown.notify_one();

    match tokio::time::timeout(Duration::from_secs(2), viewer).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Viewer task failed: {:?}", e),
        Err(_) => warn!("Viewer task did not stop in time"),
    }

    metrics.log_summary();
    if metrics.live_schedules() != 0 {
        warn!("⚠️ {} schedules still live after teardown", metrics.live_schedules());
    }
    Ok(())
}

/// Renders every panel update the way the presentation layer would consume it.
async fn viewer_task(mut state_rx: watch::Receiver<PanelState>, shutdown: Arc<Notify>) {
    if *state_rx.borrow() == PanelState::Loading {
        info!("👀 Live stats loading...");
    }

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    info!("👀 Panel closed");
                    break;
                }
                if let PanelState::Ready(labels) = &*state_rx.borrow_and_update() {
                    info!(
                        "👀 Speed {} Gbps | Uptime {}% | Servers {} | Users {}",
                        labels.speed_label, labels.uptime_label, labels.servers_label, labels.users_label
                    );
                }
            }
            _ = shutdown.notified() => {
                info!("👀 Viewer shutting down");
                break;
            }
        }
    }
}

fn print_dashboard(registry: &DeviceRegistry, config: &SimConfig) {
    let summary = registry.summary(config.summary_mode);
    info!(
        "📱 {} devices, {} online, {} secure, {} transferred, {} threats blocked ({:?} summary)",
        summary.total_devices,
        summary.online_devices,
        summary.secure_devices,
        format_data_usage(summary.data_transferred_mb),
        summary.threats_blocked,
        config.summary_mode,
    );
    registry.consistency_gaps();

    for device in registry.devices() {
        let mut extras = String::new();
        if let Some(level) = device.battery_level_percent {
            extras.push_str(&format!(" battery={}%", level));
        }
        if let Some(temp) = device.temperature_celsius {
            extras.push_str(&format!(" temp={}°C", temp));
        }
        info!(
            "📱 {:<24} {:?}/{} {:?} {:?} seen {} usage {}{}",
            device.name,
            device.status,
            status_color(device.status).as_str(),
            device.security,
            device.kind,
            device.last_seen,
            format_data_usage(device.data_usage_mb),
            extras,
        );
    }
}

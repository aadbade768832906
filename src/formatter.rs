use crate::types::{DisplaySnapshot, MetricsSnapshot};

/// Turn a raw snapshot into the labels the live-stats panel renders.
pub fn format(snapshot: &MetricsSnapshot) -> DisplaySnapshot {
    DisplaySnapshot {
        speed_label: format!("{}+", snapshot.speed_gbps.round() as i64),
        uptime_label: format_hundredths(snapshot.uptime_percent),
        servers_label: format!("{}+", round_to_hundred(snapshot.server_count)),
        users_label: format_millions(snapshot.active_users),
    }
}

// `{:.2}` rounds exact binary ties to even; labels round half up
fn format_hundredths(value: f64) -> String {
    let hundredths = (value * 100.0).round() as u64;
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

fn format_millions(users: u64) -> String {
    let tenths = (users + 50_000) / 100_000;
    format!("{}.{}M+", tenths / 10, tenths % 10)
}

fn round_to_hundred(count: u32) -> u64 {
    (f64::from(count) / 100.0).round() as u64 * 100
}

/// Human-readable data volume for a device row, e.g. `"512 MB"` or `"1.5 GB"`.
pub fn format_data_usage(mb: u64) -> String {
    if mb < 1024 {
        format!("{} MB", mb)
    } else {
        format!("{:.1} GB", mb as f64 / 1024.0)
    }
}

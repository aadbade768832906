use crate::{config::*, types::MetricsSnapshot};
use rand::Rng;

/// Draw a fresh snapshot. Every field is sampled independently from its
/// half-open range, so the lower bound is reachable and the upper one is not.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> MetricsSnapshot {
    MetricsSnapshot {
        speed_gbps: rng.gen_range(SPEED_GBPS_BASE..SPEED_GBPS_BASE + SPEED_GBPS_SPAN),
        uptime_percent: rng.gen_range(UPTIME_PERCENT_BASE..UPTIME_PERCENT_BASE + UPTIME_PERCENT_SPAN),
        server_count: rng.gen_range(SERVER_COUNT_BASE..SERVER_COUNT_BASE + SERVER_COUNT_SPAN),
        active_users: rng.gen_range(ACTIVE_USERS_BASE..ACTIVE_USERS_BASE + ACTIVE_USERS_SPAN),
    }
}

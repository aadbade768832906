use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Lifecycle counters shared by every schedule started with the same handle.
#[derive(Debug, Clone, Default)]
pub struct ScheduleMetrics {
    pub schedules_started: Arc<AtomicU64>,
    pub schedules_cancelled: Arc<AtomicU64>,
    pub updates_delivered: Arc<AtomicU64>,
    // Ticks that fired after cancellation and were dropped at the gate
    pub updates_suppressed: Arc<AtomicU64>,
}

impl ScheduleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_started(&self) {
        self.schedules_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cancelled(&self) {
        self.schedules_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delivered(&self) {
        self.updates_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_suppressed(&self) {
        self.updates_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delivered(&self) -> u64 {
        self.updates_delivered.load(Ordering::Relaxed)
    }

    /// Schedules started but not yet cancelled. Non-zero after teardown means a leaked timer.
    pub fn live_schedules(&self) -> u64 {
        let started = self.schedules_started.load(Ordering::Relaxed);
        started.saturating_sub(self.schedules_cancelled.load(Ordering::Relaxed))
    }

    pub fn log_summary(&self) {
        info!(
            started = self.schedules_started.load(Ordering::Relaxed),
            cancelled = self.schedules_cancelled.load(Ordering::Relaxed),
            delivered = self.updates_delivered.load(Ordering::Relaxed),
            suppressed = self.updates_suppressed.load(Ordering::Relaxed),
            "📊 Schedule metrics summary"
        );
    }
}

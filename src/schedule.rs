//! Delayed-then-repeating snapshot schedule.
//!
//! Each schedule owns one tokio task. The first tick fires after the initial
//! delay, later ticks on the fixed period. Every tick passes through a gate
//! shared with the [`CancelHandle`]; once [`CancelHandle::cancel`] returns,
//! no further update reaches the callback, even if a timer was already firing.

use crate::{config::SimConfig, formatter::format, generator::generate, metrics::ScheduleMetrics, types::DisplaySnapshot};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

static NEXT_SCHEDULE_ID: AtomicU64 = AtomicU64::new(1);

struct Shared {
    id: u64,
    active: AtomicBool,
    // Held for the whole generate-format-deliver step and by cancel()
    gate: Mutex<()>,
    shutdown: Notify,
    delivered: AtomicU64,
    metrics: ScheduleMetrics,
}

impl Shared {
    /// Returns false once the schedule has been cancelled.
    fn deliver<R, F>(&self, rng: &mut R, on_update: &mut F) -> bool
    where
        R: Rng,
        F: FnMut(DisplaySnapshot),
    {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.active.load(Ordering::Acquire) {
            debug!("⏱️ Schedule {} tick dropped after cancel", self.id);
            self.metrics.increment_suppressed();
            return false;
        }

        let labels = format(&generate(rng));
        debug!("⏱️ Schedule {} update: {:?}", self.id, labels);
        on_update(labels);

        self.delivered.fetch_add(1, Ordering::Relaxed);
        self.metrics.increment_delivered();
        true
    }
}

/// Owned handle to a running schedule. Dropping it cancels the schedule.
pub struct CancelHandle {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl CancelHandle {
    /// Stop the schedule. Idempotent; safe before the first tick has fired.
    ///
    /// Blocks the calling thread while an update is being delivered, so it
    /// must not be called from inside that schedule's own callback. The same
    /// applies to `Drop` and [`join`](Self::join): from async code, a slow
    /// callback stalls the runtime worker that cancels, so keep callbacks short.
    pub fn cancel(&self) {
        let gate = self.shared.gate.lock().unwrap_or_else(PoisonError::into_inner);
        let was_active = self.shared.active.swap(false, Ordering::AcqRel);
        drop(gate);

        if was_active {
            self.shared.metrics.increment_cancelled();
            info!(
                "🛑 Schedule {} cancelled after {} updates",
                self.shared.id,
                self.updates_delivered()
            );
        }
        // notify_one stores a permit, so the task wakes even if it is not parked yet
        self.shared.shutdown.notify_one();
    }

    /// Cancel and wait for the schedule task to release its timers.
    pub async fn join(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    pub fn updates_delivered(&self) -> u64 {
        self.shared.delivered.load(Ordering::Relaxed)
    }

    pub fn id(&self) -> u64 {
        self.shared.id
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a schedule with its own metrics. Must be called inside a tokio runtime.
pub fn start_schedule<R, F>(config: &SimConfig, rng: R, on_update: F) -> CancelHandle
where
    R: Rng + Send + 'static,
    F: FnMut(DisplaySnapshot) + Send + 'static,
{
    start_schedule_with_metrics(config, rng, ScheduleMetrics::new(), on_update)
}

pub fn start_schedule_with_metrics<R, F>(
    config: &SimConfig,
    rng: R,
    metrics: ScheduleMetrics,
    on_update: F,
) -> CancelHandle
where
    R: Rng + Send + 'static,
    F: FnMut(DisplaySnapshot) + Send + 'static,
{
    let shared = Arc::new(Shared {
        id: NEXT_SCHEDULE_ID.fetch_add(1, Ordering::Relaxed),
        active: AtomicBool::new(true),
        gate: Mutex::new(()),
        shutdown: Notify::new(),
        delivered: AtomicU64::new(0),
        metrics,
    });
    shared.metrics.increment_started();

    let initial_delay = config.initial_delay();
    // interval_at panics on a zero period
    let period = config.update_period().max(Duration::from_millis(1));
    info!(
        "⏱️ Schedule {} started: first update in {:?}, then every {:?}",
        shared.id, initial_delay, period
    );

    let task = tokio::spawn(run_schedule(shared.clone(), initial_delay, period, rng, on_update));

    CancelHandle {
        shared,
        task: Some(task),
    }
}

async fn run_schedule<R, F>(
    shared: Arc<Shared>,
    initial_delay: Duration,
    period: Duration,
    mut rng: R,
    mut on_update: F,
) where
    R: Rng,
    F: FnMut(DisplaySnapshot),
{
    let mut ticker = interval_at(Instant::now() + initial_delay, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = shared.shutdown.notified() => {
                break;
            }

            _ = ticker.tick() => {
                if !shared.deliver(&mut rng, &mut on_update) {
                    break;
                }
            }
        }
    }
    debug!("⏱️ Schedule {} task exited", shared.id);
}

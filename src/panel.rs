use crate::{
    config::SimConfig,
    metrics::ScheduleMetrics,
    schedule::{start_schedule_with_metrics, CancelHandle},
    types::PanelState,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tracing::info;

/// One mounted live-stats panel: owns its schedule and its latest state.
pub struct LiveStatsPanel {
    handle: CancelHandle,
    state_rx: watch::Receiver<PanelState>,
}

impl LiveStatsPanel {
    /// Mount with an entropy-seeded generator. Must be called inside a tokio runtime.
    pub fn mount(config: &SimConfig) -> Self {
        Self::mount_with_metrics(config, ScheduleMetrics::new())
    }

    /// Mount and record the schedule's lifecycle into shared `metrics`.
    pub fn mount_with_metrics(config: &SimConfig, metrics: ScheduleMetrics) -> Self {
        Self::mount_with_rng(config, StdRng::from_entropy(), metrics)
    }

    pub fn mount_with_rng<R>(config: &SimConfig, rng: R, metrics: ScheduleMetrics) -> Self
    where
        R: Rng + Send + 'static,
    {
        // watch: latest state only, no history
        let (state_tx, state_rx) = watch::channel(PanelState::Loading);

        let handle = start_schedule_with_metrics(config, rng, metrics, move |labels| {
            state_tx.send_replace(PanelState::Ready(labels));
        });
        info!("📺 Live stats panel mounted (schedule {})", handle.id());

        Self { handle, state_rx }
    }

    pub fn current(&self) -> PanelState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state_rx.clone()
    }

    pub fn updates_delivered(&self) -> u64 {
        self.handle.updates_delivered()
    }

    /// Tear the panel down and wait for its timers to be released.
    pub async fn unmount(self) {
        let id = self.handle.id();
        self.handle.join().await;
        info!("📺 Live stats panel unmounted (schedule {})", id);
    }
}

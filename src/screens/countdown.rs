use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, trace};

use crate::{
    models::view_state::DetailsData,
    screens::{details::countdown_for, holder::DataUpdater},
    utils::time_utils::Clock,
};

/// Periodic countdown refresh. Re-derives against a fresh "now" without
/// fetching; the task is aborted when the ticker is dropped.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn start(updater: DataUpdater<DetailsData>, clock: Arc<dyn Clock>, period: Duration) -> Self {
        debug!(?period, "starting countdown ticker");
        let handle = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let now = clock.now();
                updater.update(|data| {
                    let countdown = countdown_for(data.countdown_target, now);
                    let changed = countdown != data.countdown;
                    data.countdown = countdown;
                    changed
                });
                trace!("countdown tick");
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        debug!("stopping countdown ticker");
        self.handle.abort();
    }
}

use std::time::Duration;

use bon::Builder;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    api::{heartbeat::Heartbeat, price_source::PriceSource},
    core::refresher::PriceRefresher,
    prelude::*,
    quantity::euros::Euros,
};

/// Default refresh cadence.
pub const PERIOD: Duration = Duration::from_secs(15 * 60);

/// Drives a refresher on a fixed period.
///
/// The first cycle starts immediately. A cycle that overruns the period delays the next tick
/// instead of bursting, and there are no retries in between: the next tick is the recovery.
#[derive(Builder)]
pub struct Scheduler<S> {
    #[builder(into)]
    entry_id: String,

    refresher: PriceRefresher<S>,

    #[builder(default = PERIOD)]
    period: Duration,

    heartbeat: Heartbeat,
}

impl<S: PriceSource> Scheduler<S> {
    pub async fn run(mut self) {
        let mut interval = interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    #[instrument(skip_all, fields(entry_id = %self.entry_id))]
    async fn tick(&mut self) {
        match self.refresher.refresh().await {
            Ok(snapshot) => {
                info!(
                    interval = snapshot.interval().as_str(),
                    marginal = ?snapshot.marginal(),
                    current = %Euros::from(snapshot.current().total).round_to_display(),
                    average = %Euros::from(snapshot.average()).round_to_display(),
                    min = %Euros::from(snapshot.min()).round_to_display(),
                    max = %Euros::from(snapshot.max()).round_to_display(),
                    "refreshed"
                );
                self.heartbeat.send().await;
            }
            Err(error) => {
                let error = Error::from(error);
                warn!("update failed, keeping the previous snapshot as stale: {error:#}");
            }
        }
    }
}

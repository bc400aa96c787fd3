use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::watch;

use crate::{
    api::price_source::PriceSource,
    core::{
        error::RefreshError,
        interval::Interval,
        plan::Plan,
        settings::EntrySettings,
        snapshot::PriceSnapshot,
    },
    prelude::*,
    quantity::cents::Cents,
};

/// What the consumers observe.
#[derive(Clone, Debug, Default)]
pub struct Status {
    /// Latest successfully derived snapshot, kept across failed cycles.
    pub snapshot: Option<Arc<PriceSnapshot>>,

    /// Whether the last cycle succeeded. A retained snapshot is stale otherwise.
    pub last_update_success: bool,
}

impl Status {
    /// The snapshot, unless it is missing or stale.
    pub fn available_snapshot(&self) -> Option<&PriceSnapshot> {
        self.snapshot.as_deref().filter(|_| self.last_update_success)
    }
}

/// Fetches the configured table and publishes derived snapshots.
///
/// A cycle holds the refresher mutably, so cycles of the same refresher never overlap.
/// The status is replaced in one step at the very end of a cycle: consumers see either
/// the previous or the new snapshot.
pub struct PriceRefresher<S> {
    source: S,
    settings: watch::Receiver<EntrySettings>,
    status: watch::Sender<Status>,
}

impl<S: PriceSource> PriceRefresher<S> {
    pub fn new(source: S, settings: watch::Receiver<EntrySettings>) -> Self {
        let (status, _) = watch::channel(Status::default());
        Self { source, settings, status }
    }

    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    pub fn plan(&self) -> Plan {
        self.settings.borrow().plan()
    }

    pub fn interval(&self) -> Interval {
        self.settings.borrow().interval()
    }

    pub fn marginal(&self) -> Cents {
        self.settings.borrow().marginal()
    }

    pub async fn refresh(&mut self) -> Result<Arc<PriceSnapshot>, RefreshError> {
        self.refresh_at(Local::now()).await
    }

    /// Run a cycle as if the wall clock showed `now`.
    #[instrument(
        skip_all,
        fields(
            plan = self.plan().id(),
            interval = self.interval().as_str(),
            marginal = ?self.marginal()
        )
    )]
    pub async fn refresh_at(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<Arc<PriceSnapshot>, RefreshError> {
        // Settings are fixed for the duration of a cycle.
        let settings = self.settings.borrow_and_update().clone();
        let result = self.derive(&settings, now).await.map(Arc::new);
        self.status.send_modify(|status| match &result {
            Ok(snapshot) => {
                status.snapshot = Some(Arc::clone(snapshot));
                status.last_update_success = true;
            }
            Err(_) => {
                status.last_update_success = false;
            }
        });
        result
    }

    async fn derive(
        &self,
        settings: &EntrySettings,
        now: DateTime<Local>,
    ) -> Result<PriceSnapshot, RefreshError> {
        let interval = settings.interval();
        let table = self
            .source
            .get_price_table(settings.plan(), interval)
            .await
            .map_err(RefreshError::FetchFailed)?;
        let snapshot = PriceSnapshot::try_derive(table, interval, settings.marginal(), now)?;
        info!(
            start = %snapshot.current().starts_at,
            n_prices = snapshot.prices().len(),
            current = ?snapshot.current().total,
            "derived"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        api::price_source::tests::ScriptedSource,
        core::{
            settings::{EntryData, EntryOptions},
            snapshot::tests::{local, midnight, quarterly_table},
        },
    };

    fn settings() -> EntrySettings {
        EntrySettings::new(EntryData {
            plan: Plan::V4,
            interval: Some(Interval::Quarterly),
            marginal: Some(Cents(1.0)),
        })
    }

    #[tokio::test]
    async fn test_refresh_publishes_snapshot() -> Result {
        let source = ScriptedSource::default().respond(Ok(quarterly_table()));
        let (_settings, receiver) = watch::channel(settings());
        let mut refresher = PriceRefresher::new(source.clone(), receiver);
        let status = refresher.subscribe();

        let now = local(midnight() + chrono::TimeDelta::minutes(10 * 60 + 22));
        let snapshot = refresher.refresh_at(now).await?;

        assert_eq!(snapshot.current().time_label(), "10:15");
        assert_eq!(snapshot.fetched_at(), now);
        assert_eq!(*source.requests.lock().unwrap(), [(Plan::V4, Interval::Quarterly)]);
        let status = status.borrow();
        assert!(status.last_update_success);
        assert_eq!(status.available_snapshot().map(|it| it.prices().len()), Some(96 - 41));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() -> Result {
        let source =
            ScriptedSource::default().respond(Ok(quarterly_table())).respond(Err("HTTP 500"));
        let (_settings, receiver) = watch::channel(settings());
        let mut refresher = PriceRefresher::new(source, receiver);
        let status = refresher.subscribe();
        let now = local(midnight() + chrono::TimeDelta::hours(12));

        let first = refresher.refresh_at(now).await?;
        let error = refresher.refresh_at(now).await.unwrap_err();

        assert!(matches!(error, RefreshError::FetchFailed(_)));
        let status = status.borrow();
        assert!(!status.last_update_success);
        assert!(status.available_snapshot().is_none());
        assert!(Arc::ptr_eq(status.snapshot.as_ref().unwrap(), &first));
        Ok(())
    }

    #[tokio::test]
    async fn test_no_data_for_current_time() {
        let source = ScriptedSource::default().respond(Ok(quarterly_table()));
        let (_settings, receiver) = watch::channel(settings());
        let mut refresher = PriceRefresher::new(source, receiver);

        let now = local(midnight() + chrono::TimeDelta::days(1));
        let error = refresher.refresh_at(now).await.unwrap_err();

        assert!(matches!(error, RefreshError::NoDataForCurrentTime { .. }));
        assert!(refresher.subscribe().borrow().snapshot.is_none());
    }

    #[tokio::test]
    async fn test_options_apply_on_next_cycle() -> Result {
        let source = ScriptedSource::default()
            .respond(Ok(quarterly_table()))
            .respond(Ok(quarterly_table()));
        let (settings_sender, receiver) = watch::channel(settings());
        let mut refresher = PriceRefresher::new(source.clone(), receiver);
        let now = local(midnight() + chrono::TimeDelta::minutes(10 * 60 + 22));

        let before = refresher.refresh_at(now).await?;
        settings_sender.send_modify(|settings| {
            settings.options =
                EntryOptions { interval: Some(Interval::Hourly), marginal: Some(Cents(101.0)) };
        });
        assert_eq!(refresher.interval(), Interval::Hourly);
        assert_eq!(refresher.marginal(), Cents(101.0));
        let after = refresher.refresh_at(now).await?;

        assert_eq!(
            *source.requests.lock().unwrap(),
            [(Plan::V4, Interval::Quarterly), (Plan::V4, Interval::Hourly)],
        );
        assert_eq!(before.current().time_label(), "10:15");
        assert_eq!((before.interval(), before.marginal()), (Interval::Quarterly, Cents(1.0)));
        assert_eq!(after.current().time_label(), "10:00");
        assert_eq!((after.interval(), after.marginal()), (Interval::Hourly, Cents(101.0)));
        assert_abs_diff_eq!(
            after.current().total.0,
            101.0 + after.current().tariff.sum().0,
            epsilon = 1e-9
        );
        Ok(())
    }
}

use std::{collections::BTreeMap, time::Duration};

use itertools::Itertools;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    api::{heartbeat::Heartbeat, price_source::PriceSource},
    config::EntryConfig,
    core::{
        refresher::{PriceRefresher, Status},
        scheduler::Scheduler,
        settings::{EntryOptions, EntrySettings},
    },
    prelude::*,
    readings::Readings,
};

/// Set-up entries, each owning a refresher driven by its own scheduler task.
pub struct Registry<S> {
    source: S,
    period: Duration,
    heartbeat: Heartbeat,
    entries: BTreeMap<String, Handle>,
}

struct Handle {
    settings: watch::Sender<EntrySettings>,
    status: watch::Receiver<Status>,
    task: JoinHandle<()>,
}

impl<S: PriceSource + Clone + 'static> Registry<S> {
    pub const fn new(source: S, period: Duration, heartbeat: Heartbeat) -> Self {
        Self { source, period, heartbeat, entries: BTreeMap::new() }
    }

    #[instrument(skip_all, fields(entry_id = %entry.id))]
    pub fn setup(&mut self, entry: EntryConfig) -> Result {
        ensure!(!self.entries.contains_key(&entry.id), "entry `{}` is already set up", entry.id);
        entry.settings.validate()?;
        let plan = entry.settings.plan();
        if let Some((id, _)) =
            self.entries.iter().find(|(_, handle)| handle.settings.borrow().plan() == plan)
        {
            bail!("plan `{}` is already configured by entry `{id}`", plan.id());
        }

        let (settings, receiver) = watch::channel(entry.settings);
        let refresher = PriceRefresher::new(self.source.clone(), receiver);
        let status = refresher.subscribe();
        let scheduler = Scheduler::builder()
            .entry_id(entry.id.clone())
            .refresher(refresher)
            .period(self.period)
            .heartbeat(self.heartbeat.clone())
            .build();
        let task = tokio::spawn(scheduler.run());
        info!(%plan, "set up");
        self.entries.insert(entry.id, Handle { settings, status, task });
        Ok(())
    }

    /// Replace the options of the entry, effective from the next cycle.
    pub fn update_options(&self, id: &str, options: EntryOptions) -> Result {
        let handle =
            self.entries.get(id).with_context(|| format!("entry `{id}` is not set up"))?;
        let settings = handle.settings.borrow().clone().with_options(options);
        settings.validate().with_context(|| format!("invalid options for entry `{id}`"))?;
        if *handle.settings.borrow() != settings {
            info!(entry_id = id, "updating options");
            handle.settings.send_replace(settings);
        }
        Ok(())
    }

    /// Reconcile the set-up entries with the configuration.
    ///
    /// Entries missing from the configuration are removed, new ones are set up, and changed
    /// options are applied in place. Changed setup data re-creates the entry.
    ///
    /// The whole configuration is checked first: on error, the registry is left untouched.
    pub fn apply(&mut self, entries: Vec<EntryConfig>) -> Result {
        if let Some(id) = entries.iter().map(|entry| &entry.id).duplicates().next() {
            bail!("entry `{id}` is configured more than once");
        }
        if let Some(plan) = entries.iter().map(|entry| entry.settings.plan()).duplicates().next() {
            bail!("plan `{}` is configured more than once", plan.id());
        }
        for entry in &entries {
            entry.settings.validate().with_context(|| format!("invalid entry `{}`", entry.id))?;
        }

        let retired_ids = self
            .entries
            .iter()
            .filter(|(id, handle)| {
                !entries.iter().any(|entry| {
                    &entry.id == *id && entry.settings.data == handle.settings.borrow().data
                })
            })
            .map(|(id, _)| id.clone())
            .collect_vec();
        for id in retired_ids {
            self.remove(&id);
        }
        for entry in entries {
            if self.entries.contains_key(&entry.id) {
                self.update_options(&entry.id, entry.settings.options)?;
            } else {
                self.setup(entry)?;
            }
        }
        Ok(())
    }

    /// Tear the entry down, abandoning its in-flight cycle if any.
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some_and(|handle| {
            handle.task.abort();
            info!(entry_id = id, "removed");
            true
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn readings(&self, id: &str) -> Option<Readings> {
        self.entries
            .get(id)
            .map(|handle| Readings::new(&handle.settings.borrow(), &handle.status.borrow()))
    }
}

impl<S> Drop for Registry<S> {
    fn drop(&mut self) {
        for handle in self.entries.values() {
            handle.task.abort();
        }
    }
}

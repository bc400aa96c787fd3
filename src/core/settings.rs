use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    core::{interval::Interval, plan::Plan},
    prelude::*,
    quantity::cents::Cents,
};

/// Allowed provider markup: up to 100 € in cents.
pub const MARGINAL_RANGE: RangeInclusive<Cents> = Cents(0.0)..=Cents(10_000.0);

/// Values collected once when the entry is created.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EntryData {
    pub plan: Plan,

    #[serde(default)]
    pub interval: Option<Interval>,

    /// Provider markup in cents.
    #[serde(default)]
    pub marginal: Option<Cents>,
}

/// Values edited afterwards, they take precedence over [`EntryData`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EntryOptions {
    #[serde(default)]
    pub interval: Option<Interval>,

    #[serde(default)]
    pub marginal: Option<Cents>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EntrySettings {
    pub data: EntryData,

    #[serde(default)]
    pub options: EntryOptions,
}

impl EntrySettings {
    pub const fn new(data: EntryData) -> Self {
        Self { data, options: EntryOptions { interval: None, marginal: None } }
    }

    #[must_use]
    pub fn with_options(mut self, options: EntryOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn plan(&self) -> Plan {
        self.data.plan
    }

    pub fn interval(&self) -> Interval {
        self.options.interval.or(self.data.interval).unwrap_or_default()
    }

    pub fn marginal(&self) -> Cents {
        self.options.marginal.or(self.data.marginal).unwrap_or(Cents::ZERO)
    }

    pub fn validate(&self) -> Result {
        for marginal in [self.data.marginal, self.options.marginal].into_iter().flatten() {
            ensure!(
                marginal.0.is_finite() && MARGINAL_RANGE.contains(&marginal),
                "marginal must be within {MARGINAL_RANGE:?}, got {marginal:?}"
            );
        }
        Ok(())
    }
}

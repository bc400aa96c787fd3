use std::iter::Sum;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{cents::Cents, euros::Euros},
};

/// Cost components of a single time slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Tariff<V> {
    pub electricity: V,
    pub transmission: V,
    pub renewable: V,
    pub excise: V,
    pub supply_security: V,
}

impl<V> Tariff<V> {
    pub fn map<R>(self, f: impl Fn(V) -> R) -> Tariff<R> {
        Tariff {
            electricity: f(self.electricity),
            transmission: f(self.transmission),
            renewable: f(self.renewable),
            excise: f(self.excise),
            supply_security: f(self.supply_security),
        }
    }
}

impl<V: Sum<V>> Tariff<V> {
    pub fn sum(self) -> V {
        [self.electricity, self.transmission, self.renewable, self.excise, self.supply_security]
            .into_iter()
            .sum()
    }
}

/// Upstream table row.
///
/// On the wire it is a fixed-width array of the start date and time followed by the components
/// in euros: `[year, month, day, hour, minute, electricity, transmission, renewable, excise,
/// supply_security]`.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(try_from = "RawRow")]
pub struct RawPriceEntry {
    /// Local wall-clock start of the slot.
    pub starts_at: NaiveDateTime,

    pub tariff: Tariff<Euros>,
}

#[derive(Deserialize)]
struct RawRow(i32, u32, u32, u32, u32, f64, f64, f64, f64, f64);

impl TryFrom<RawRow> for RawPriceEntry {
    type Error = Error;

    fn try_from(row: RawRow) -> Result<Self> {
        let RawRow(
            year,
            month,
            day,
            hour,
            minute,
            electricity,
            transmission,
            renewable,
            excise,
            supply_security,
        ) = row;
        let starts_at = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .with_context(|| format!("invalid slot start: {year}-{month}-{day} {hour}:{minute}"))?;
        let tariff =
            Tariff { electricity, transmission, renewable, excise, supply_security }.map(Euros);
        Ok(Self { starts_at, tariff })
    }
}

/// Derived price of a retained slot, all in cents.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PriceEntry {
    pub starts_at: NaiveDateTime,

    #[serde(flatten)]
    pub tariff: Tariff<Cents>,

    /// Components plus the provider markup.
    pub total: Cents,
}

impl PriceEntry {
    pub fn new(raw: &RawPriceEntry, marginal: Cents) -> Self {
        let tariff = raw.tariff.map(Cents::from);
        Self { starts_at: raw.starts_at, tariff, total: marginal + tariff.sum() }
    }

    /// `HH:MM` label of the slot start.
    pub fn time_label(&self) -> String {
        self.starts_at.format("%H:%M").to_string()
    }

    pub fn minute(&self) -> u32 {
        self.starts_at.minute()
    }
}

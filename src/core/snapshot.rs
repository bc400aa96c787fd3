use chrono::{DateTime, Local};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::{
    core::{
        entry::{PriceEntry, RawPriceEntry},
        error::RefreshError,
        interval::Interval,
    },
    quantity::cents::Cents,
};

/// Result of one successful refresh cycle. Never changes after construction.
#[derive(Clone, Debug, Serialize)]
pub struct PriceSnapshot {
    current: PriceEntry,

    /// Current and upcoming slots in upstream order, never empty.
    prices: Vec<PriceEntry>,

    average: Cents,
    min: Cents,
    max: Cents,

    /// Settings the snapshot was priced with.
    interval: Interval,
    marginal: Cents,

    fetched_at: DateTime<Local>,
}

impl PriceSnapshot {
    /// Keep the slots starting at or after the start of the `interval` slot containing `now`,
    /// price them, and aggregate the totals.
    pub fn try_derive(
        table: impl IntoIterator<Item = RawPriceEntry>,
        interval: Interval,
        marginal: Cents,
        now: DateTime<Local>,
    ) -> Result<Self, RefreshError> {
        let cutoff = interval.cutoff(now.naive_local());
        let prices = table
            .into_iter()
            .filter(|entry| entry.starts_at >= cutoff)
            .map(|entry| PriceEntry::new(&entry, marginal))
            .collect_vec();
        let Some(&current) = prices.first() else {
            return Err(RefreshError::NoDataForCurrentTime { cutoff });
        };
        let (min, max) = match prices.iter().map(|entry| entry.total).minmax() {
            MinMaxResult::MinMax(min, max) => (min, max),
            MinMaxResult::OneElement(total) => (total, total),
            MinMaxResult::NoElements => (current.total, current.total),
        };
        #[expect(clippy::cast_precision_loss)]
        let average = prices.iter().map(|entry| entry.total).sum::<Cents>() / prices.len() as f64;
        Ok(Self { current, prices, average, min, max, interval, marginal, fetched_at: now })
    }

    pub const fn current(&self) -> &PriceEntry {
        &self.current
    }

    pub fn prices(&self) -> &[PriceEntry] {
        &self.prices
    }

    pub const fn average(&self) -> Cents {
        self.average
    }

    pub const fn min(&self) -> Cents {
        self.min
    }

    pub const fn max(&self) -> Cents {
        self.max
    }

    pub const fn interval(&self) -> Interval {
        self.interval
    }

    pub const fn marginal(&self) -> Cents {
        self.marginal
    }

    pub const fn fetched_at(&self) -> DateTime<Local> {
        self.fetched_at
    }
}

#[cfg(test)]
pub mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

    use super::*;
    use crate::{core::entry::Tariff, quantity::euros::Euros};

    pub fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    pub fn local(naive: NaiveDateTime) -> DateTime<Local> {
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    /// Quarter-hour slots over the whole test day, electricity price growing with the slot index.
    pub fn quarterly_table() -> Vec<RawPriceEntry> {
        quarterly_table_since(midnight(), 96)
    }

    pub fn quarterly_table_since(start: NaiveDateTime, n_slots: i32) -> Vec<RawPriceEntry> {
        (0..n_slots)
            .map(|index| RawPriceEntry {
                starts_at: start + TimeDelta::minutes(15 * i64::from(index)),
                tariff: Tariff {
                    electricity: Euros(0.001 * f64::from(index)),
                    transmission: Euros(0.0458),
                    renewable: Euros(0.0104),
                    excise: Euros(0.0026),
                    supply_security: Euros(0.0094),
                },
            })
            .collect()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        midnight().date().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn derive_at(now: NaiveDateTime, marginal: Cents) -> Result<PriceSnapshot, RefreshError> {
        PriceSnapshot::try_derive(quarterly_table(), Interval::Quarterly, marginal, local(now))
    }

    #[test]
    fn test_retains_current_and_upcoming() -> Result<(), RefreshError> {
        let snapshot = derive_at(at(10, 22), Cents::ZERO)?;
        assert_eq!(snapshot.prices().len(), 96 - 41);
        assert_eq!(snapshot.current().time_label(), "10:15");
        assert_eq!(snapshot.current(), &snapshot.prices()[0]);
        assert!(snapshot.prices().iter().is_sorted_by_key(|entry| entry.starts_at));
        assert_eq!(snapshot.fetched_at(), local(at(10, 22)));
        Ok(())
    }

    #[test]
    fn test_hourly_cutoff() -> Result<(), RefreshError> {
        let snapshot = PriceSnapshot::try_derive(
            quarterly_table(),
            Interval::Hourly,
            Cents::ZERO,
            local(at(10, 22)),
        )?;
        assert_eq!(snapshot.current().time_label(), "10:00");
        assert_eq!(snapshot.interval(), Interval::Hourly);
        Ok(())
    }

    #[test]
    fn test_aggregates() -> Result<(), RefreshError> {
        let snapshot = derive_at(at(23, 0), Cents(10.0))?;
        let totals = snapshot.prices().iter().map(|entry| entry.total.0).collect_vec();
        assert_eq!(totals.len(), 4);
        assert_abs_diff_eq!(snapshot.average().0, totals.iter().sum::<f64>() / 4.0, epsilon = 1e-9);
        assert_eq!(snapshot.min(), snapshot.prices()[0].total);
        assert_eq!(snapshot.max(), snapshot.prices()[3].total);
        assert_abs_diff_eq!(snapshot.max().0, 10.0 + 9.5 + 6.82, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_totals_include_marginal() -> Result<(), RefreshError> {
        let marginal = Cents(123.0);
        let snapshot = derive_at(at(0, 0), marginal)?;
        assert_eq!(snapshot.marginal(), marginal);
        for entry in snapshot.prices() {
            assert_abs_diff_eq!(entry.total.0, (marginal + entry.tariff.sum()).0, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_single_entry() -> Result<(), RefreshError> {
        let snapshot = derive_at(at(23, 45), Cents::ZERO)?;
        assert_eq!(snapshot.prices().len(), 1);
        assert_eq!(snapshot.min(), snapshot.max());
        assert_eq!(snapshot.average(), snapshot.current().total);
        Ok(())
    }

    #[test]
    fn test_same_now_same_result() -> Result<(), RefreshError> {
        let first = derive_at(at(12, 37), Cents::ZERO)?;
        let second = derive_at(at(12, 37), Cents::ZERO)?;
        assert_eq!(first.prices(), second.prices());
        Ok(())
    }

    #[test]
    fn test_no_data_for_current_time() {
        let cutoff = midnight() + TimeDelta::days(1);
        let result = derive_at(cutoff, Cents::ZERO);
        assert!(matches!(
            result,
            Err(RefreshError::NoDataForCurrentTime { cutoff: actual }) if actual == cutoff
        ));
    }

    #[test]
    fn test_empty_table() {
        let result =
            PriceSnapshot::try_derive(Vec::new(), Interval::Hourly, Cents::ZERO, local(midnight()));
        assert!(matches!(result, Err(RefreshError::NoDataForCurrentTime { .. })));
    }
}

use serde::Serialize;

use crate::{
    core::{interval::Interval, refresher::Status, settings::EntrySettings},
    quantity::{cents::Cents, euros::Euros},
};

/// Number of upcoming prices attached to the current price.
const N_ATTRIBUTE_PRICES: usize = 24;

/// Values presented to the consumers.
///
/// Prices are absent until the first successful cycle, and while the latest cycle failed.
#[derive(Clone, Debug, Serialize)]
pub struct Readings {
    pub current_price: Option<CurrentPrice>,
    pub average_price: Option<Euros>,
    pub min_price: Option<Euros>,
    pub max_price: Option<Euros>,
    pub plan: String,
    pub interval: Interval,
    pub marginal: Euros,
}

#[derive(Clone, Debug, Serialize)]
pub struct CurrentPrice {
    pub price: Euros,
    pub time: String,
    pub electricity_price: Euros,
    pub transmission: Euros,
    pub renewable_tax: Euros,
    pub supply_security: Euros,
    pub excise: Euros,
    pub marginal: Euros,
    pub prices: Vec<PricePoint>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PricePoint {
    pub time: String,
    pub price: Euros,
}

impl Readings {
    pub fn new(settings: &EntrySettings, status: &Status) -> Self {
        let marginal = present(settings.marginal());
        let snapshot = status.available_snapshot();
        let current_price = snapshot.map(|snapshot| {
            let current = snapshot.current();
            CurrentPrice {
                price: present(current.total),
                time: current.time_label(),
                electricity_price: present(current.tariff.electricity),
                transmission: present(current.tariff.transmission),
                renewable_tax: present(current.tariff.renewable),
                supply_security: present(current.tariff.supply_security),
                excise: present(current.tariff.excise),
                marginal,
                prices: snapshot
                    .prices()
                    .iter()
                    .take(N_ATTRIBUTE_PRICES)
                    .map(|entry| PricePoint {
                        time: entry.time_label(),
                        price: present(entry.total),
                    })
                    .collect(),
            }
        });
        Self {
            current_price,
            average_price: snapshot.map(|snapshot| present(snapshot.average())),
            min_price: snapshot.map(|snapshot| present(snapshot.min())),
            max_price: snapshot.map(|snapshot| present(snapshot.max())),
            plan: settings.plan().to_string(),
            interval: settings.interval(),
            marginal,
        }
    }
}

fn present(cents: Cents) -> Euros {
    Euros::from(cents).round_to_display()
}

use async_trait::async_trait;

use crate::{
    core::{entry::RawPriceEntry, interval::Interval, plan::Plan},
    prelude::*,
};

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the whole published table of the plan in the given resolution.
    async fn get_price_table(&self, plan: Plan, interval: Interval) -> Result<Vec<RawPriceEntry>>;
}

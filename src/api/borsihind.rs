//! [Börsihind.ee](https://borsihind.ee) price tables.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    api::price_source::PriceSource,
    core::{entry::RawPriceEntry, interval::Interval, plan::Plan},
    prelude::*,
};

pub const BASE_URL: &str = "https://borsihind.s3.eu-central-1.amazonaws.com/";

#[derive(Clone)]
pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(mut base_url: Url, timeout: Duration) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/[15min/]{plan}.json`
    pub fn table_url(&self, plan: Plan, interval: Interval) -> Result<Url> {
        let path = format!("{}{}.json", interval.path_segment(), plan.id());
        self.base_url.join(&path).with_context(|| format!("invalid table path `{path}`"))
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(plan = plan.id(), interval = interval.as_str()))]
    async fn get_price_table(&self, plan: Plan, interval: Interval) -> Result<Vec<RawPriceEntry>> {
        let url = self.table_url(plan, interval)?;
        info!(%url, "fetching…");
        let response = self.client.get(url).send().await.context("failed to call")?;
        let status = response.status();
        ensure!(status.is_success(), "request failed with {status}");
        let table = response
            .json::<Vec<RawPriceEntry>>()
            .await
            .context("failed to deserialize the price table")?;
        info!(n_entries = table.len(), "fetched");
        Ok(table)
    }
}

use clap::Parser;
use reqwest::Url;

use crate::{
    api::borsihind::{Api, BASE_URL},
    prelude::*,
};

#[derive(Parser)]
pub struct SourceArgs {
    /// Location of the published price tables.
    #[clap(long = "base-url", env = "BORSIHIND_BASE_URL", default_value = BASE_URL)]
    pub base_url: Url,
}

impl SourceArgs {
    pub fn api(&self) -> Result<Api> {
        Api::new(self.base_url.clone())
    }
}

use clap::Parser;
use reqwest::Url;

use crate::{api::heartbeat::Heartbeat, prelude::*};

#[derive(Parser)]
pub struct HeartbeatArgs {
    /// Pinged after every successful refresh.
    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    pub url: Option<Url>,
}

impl HeartbeatArgs {
    pub fn heartbeat(&self) -> Result<Heartbeat> {
        Heartbeat::new(self.url.clone())
    }
}

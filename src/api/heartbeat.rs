use std::time::Duration;

use reqwest::{Client, Url};

use crate::prelude::*;

/// Optional liveness ping, sent after every successful refresh.
#[derive(Clone)]
pub struct Heartbeat {
    client: Client,
    url: Option<Url>,
}

impl Heartbeat {
    pub fn new(url: Option<Url>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(3)).build()?;
        Ok(Self { client, url })
    }

    pub async fn send(&self) {
        if let Some(url) = &self.url
            && let Err(error) = self.send_fallible(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(&self, url: Url) -> Result {
        debug!("sending a heartbeat…");
        self.client.post(url).send().await?.error_for_status()?;
        Ok(())
    }
}

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use tokio::signal::unix::{SignalKind, signal};

use crate::{
    api::borsihind::Api,
    cli::{heartbeat::HeartbeatArgs, source::SourceArgs},
    config::Config,
    core::registry::Registry,
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// Entries to keep refreshed, re-read on `SIGHUP`.
    #[clap(long, env = "BORSIHIND_CONFIG", default_value = "borsihind.toml")]
    pub config: PathBuf,

    /// Refresh period of every entry.
    #[clap(long, env = "BORSIHIND_PERIOD", default_value = "15min")]
    pub period: humantime::Duration,

    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub heartbeat: HeartbeatArgs,
}

/// Run until interrupted. `SIGUSR1` prints the current readings as JSON lines.
#[instrument(skip_all)]
pub async fn watch(args: &WatchArgs) -> Result {
    let mut registry =
        Registry::new(args.source.api()?, args.period.into(), args.heartbeat.heartbeat()?);
    registry.apply(Config::read_from(&args.config)?.entries)?;

    let mut hangup = signal(SignalKind::hangup())?;
    let mut user_defined = signal(SignalKind::user_defined1())?;
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("interrupted");
                break;
            }
            _ = hangup.recv() => {
                info!("reloading the configuration…");
                if let Err(error) = reload(&mut registry, args) {
                    warn!("failed to reload the configuration: {error:#}");
                }
            }
            _ = user_defined.recv() => {
                print_readings(&registry);
            }
        }
    }

    for id in registry.ids().map(str::to_owned).collect_vec() {
        registry.remove(&id);
    }
    Ok(())
}

fn reload(registry: &mut Registry<Api>, args: &WatchArgs) -> Result {
    registry.apply(Config::read_from(&args.config)?.entries)
}

fn print_readings(registry: &Registry<Api>) {
    for id in registry.ids() {
        if let Some(readings) = registry.readings(id) {
            println!("{}", serde_json::json!({ "id": id, "readings": readings }));
        }
    }
}

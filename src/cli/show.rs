use clap::Parser;
use tokio::sync::watch;

use crate::{
    cli::source::SourceArgs,
    core::{
        interval::Interval,
        plan::Plan,
        refresher::PriceRefresher,
        settings::{EntryData, EntrySettings},
    },
    prelude::*,
    quantity::cents::Cents,
    readings::Readings,
    tables::{build_prices_table, build_summary_table},
};

#[derive(Parser)]
pub struct ShowArgs {
    #[clap(long, env = "BORSIHIND_PLAN")]
    pub plan: Plan,

    #[clap(long, env = "BORSIHIND_INTERVAL", default_value = "15min")]
    pub interval: Interval,

    /// Provider markup in cents.
    #[clap(long, env = "BORSIHIND_MARGINAL", default_value = "0")]
    pub marginal: f64,

    /// Print the readings as JSON instead of the tables.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub source: SourceArgs,
}

#[instrument(skip_all, fields(plan = args.plan.id(), interval = args.interval.as_str()))]
pub async fn show(args: &ShowArgs) -> Result {
    let settings = EntrySettings::new(EntryData {
        plan: args.plan,
        interval: Some(args.interval),
        marginal: Some(Cents(args.marginal)),
    });
    settings.validate()?;

    let (_settings, receiver) = watch::channel(settings.clone());
    let mut refresher = PriceRefresher::new(args.source.api()?, receiver);
    let status = refresher.subscribe();
    let snapshot = refresher.refresh().await?;

    if args.json {
        let readings = Readings::new(&settings, &status.borrow());
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else {
        println!("{}", build_prices_table(&snapshot));
        println!("{}", build_summary_table(&snapshot));
    }
    Ok(())
}

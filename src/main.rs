#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod config;
mod core;
mod prelude;
mod quantity;
mod readings;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, show, watch},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Watch(args) => watch(&args).await?,
        Command::Show(args) => show(&args).await?,
    }

    info!("done!");
    Ok(())
}

mod heartbeat;
mod show;
mod source;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{
    show::{ShowArgs, show},
    watch::{WatchArgs, watch},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: keep the configured entries refreshed until interrupted.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Fetch the prices once and print them.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),
}

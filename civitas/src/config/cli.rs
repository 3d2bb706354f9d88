use std::path::PathBuf;

use civitas_core::Address;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Location of config file: Default: civitas.toml
    #[arg(short, long, default_value = "civitas.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Subcommand {
    /// Output example config file.
    Init,

    /// Run one scan pass over every configured source.
    Index,

    /// Start the HTTP server and background indexer.
    Server,

    /// Reset a source's checkpoint so the next scan re-derives domain state from chain history. Does not delete archived events or domain rows.
    Reindex {
        /// Source contract address. Resets every configured source when omitted.
        #[arg(long)]
        source: Option<Address>,

        /// Block to reset the checkpoint to. Defaults to the source's configured starting block.
        #[arg(long)]
        block: Option<i64>,
    },

    /// Prints the current version of application
    Version,
}

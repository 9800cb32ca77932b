use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bookchain",
    about = "Bookchain: hash-chained ledger of book checkouts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repeat for more output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server with a fresh ledger
    Serve(ServeArgs),
    /// Derive a book identifier from its ISBN and publish date
    BookId(BookIdArgs),
    /// Print the effective server configuration (TOML, or JSON with --format json)
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Echo checkouts back even when the ledger refuses them
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args)]
pub struct BookIdArgs {
    #[arg(long)]
    pub isbn: String,
    #[arg(long)]
    pub publish_date: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub lenient: bool,
}

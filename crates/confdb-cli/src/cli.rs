use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "confdb",
    about = "confdb: a hierarchical in-memory object store served over HTTP",
    version,
)]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the namespace over HTTP
    Serve(ServeArgs),
    /// Print the effective server configuration
    Config(ConfigArgs),
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Listen address, e.g. `:8080` or `127.0.0.1:8080`
    #[arg(long)]
    pub addr: Option<String>,
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub max_body_size: Option<usize>,
    #[arg(long)]
    pub max_connections: Option<usize>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub serve: ServeArgs,
}

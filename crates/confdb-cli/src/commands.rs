use anyhow::Context;
use colored::Colorize;
use confdb_server::{parse_bind_addr, ConfdbServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => cmd_serve(ServeArgs::default()),
        Some(Command::Serve(args)) => cmd_serve(args),
        Some(Command::Config(args)) => cmd_config(args, &cli.format),
    }
}

/// Defaults, then the config file, then flags.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(addr) = &args.addr {
        config.bind_addr = parse_bind_addr(addr)?;
    }
    if let Some(size) = args.max_body_size {
        config.max_body_size = size;
    }
    if let Some(n) = args.max_connections {
        config.max_connections = n;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!("{} confdb listening on {}", "✓".green().bold(), config.bind_addr.to_string().bold());
    tracing::debug!(?config, "effective configuration");

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(ConfdbServer::new(config).serve())?;
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(&args.serve)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}

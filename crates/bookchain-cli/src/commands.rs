use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use bookchain_server::{AppendMode, BookchainServer, ServerConfig};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::BookId(args) => cmd_book_id(args, &cli.format),
        Command::Config(args) => cmd_config(args, &cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref(), args.bind, args.lenient)?;
    let server = BookchainServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("could not start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_book_id(args: BookIdArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = bookchain_crypto::book_id(&args.isbn, &args.publish_date);
    match format {
        OutputFormat::Text => println!("{} {}", "book id:".green(), id.to_string().bold()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "isbn": args.isbn,
                "publish_date": args.publish_date,
                "id": id,
            })
        ),
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref(), args.bind, args.lenient)?;
    print!("{}", render_config(&config, format)?);
    Ok(())
}

fn render_config(config: &ServerConfig, format: &OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => config.to_toml_string()?,
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(config)?),
    })
}

/// Config file (or defaults), then command-line overrides.
fn resolve_config(
    path: Option<&Path>,
    bind: Option<SocketAddr>,
    lenient: bool,
) -> anyhow::Result<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    if lenient {
        config.append_mode = AppendMode::Lenient;
    }
    tracing::debug!(?config, "resolved server configuration");
    Ok(config)
}

mod config;
mod error;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use backend::HttpTransport;
use clap::{Parser, Subcommand};
use dispatch::{Dispatcher, Registry};
use mcp::{ListToolsResult, Server, ServerInfo};

use config::{FileConfig, Overrides, Settings};
use error::{Error, Result};

const SERVER_NAME: &str = "radim-brain-mcp";

#[derive(Parser)]
#[command(name = "radim-mcp")]
#[command(about = "MCP tool server for the Radim Brain elder-care API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file [default: ./radim-mcp.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout
    Serve,
    /// Print the tool list as JSON
    Tools,
    /// Invoke one tool and print its result
    Call {
        /// Tool name, e.g. radim_get_senior
        tool: String,
        /// Arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => {}
        Err(Error::ToolFailed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let file = FileConfig::discover(cli.config.as_deref())?;
    let overrides = Overrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
    };
    let settings = Settings::resolve(file, &overrides, |key| std::env::var(key).ok())?;
    logging::init(&settings.log);

    let registry = Registry::builtin()?;

    match cli.command {
        Some(Commands::Serve) | None => cmd_serve(registry, &settings).await,
        Some(Commands::Tools) => cmd_tools(&registry),
        Some(Commands::Call { tool, args }) => {
            cmd_call(registry, &settings, &tool, args.as_deref()).await
        }
    }
}

fn dispatcher(registry: Registry, settings: &Settings) -> Result<Dispatcher<HttpTransport>> {
    let transport = HttpTransport::from_config(&settings.backend)?;
    Ok(Dispatcher::new(registry, transport).with_deadline(settings.backend.timeout))
}

async fn cmd_serve(registry: Registry, settings: &Settings) -> Result<()> {
    let dispatcher = dispatcher(registry, settings)?;
    tracing::info!(
        backend = %settings.backend.base_url,
        tools = dispatcher.registry().len(),
        timeout = ?settings.backend.timeout,
        "starting MCP server on stdio"
    );

    let info = ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION"));
    Server::new(info, dispatcher).serve_stdio().await?;

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn cmd_tools(registry: &Registry) -> Result<()> {
    let list = ListToolsResult {
        tools: registry.list_tools(),
    };
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

async fn cmd_call(
    registry: Registry,
    settings: &Settings,
    tool: &str,
    args: Option<&str>,
) -> Result<()> {
    let arguments: Option<serde_json::Value> = args.map(serde_json::from_str).transpose()?;
    let dispatcher = dispatcher(registry, settings)?;

    let started = Instant::now();
    let outcome = dispatcher.invoke(tool, arguments).await;
    tracing::debug!(
        tool,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "call finished"
    );

    println!("{}", outcome.render());
    if outcome.is_success() {
        Ok(())
    } else {
        Err(Error::ToolFailed)
    }
}

// gstc - GStreamer Daemon command-line client
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

use gstc::cli::{format_envelope, run_command, Command};
use gstc::client::DaemonClient;
use gstc::config::{default_config_path, load_config, write_default_config};
use gstc::errors::{daemon_error_hint, unreachable_hint, ErrorCode, UserFriendlyError};

#[derive(Parser, Debug)]
#[command(name = "gstc")]
#[command(about = "Control a remote GStreamer Daemon over HTTP", version)]
struct Args {
    #[command(subcommand)]
    command: TopCommand,

    /// Daemon host including scheme (default from config, then http://localhost)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Daemon HTTP port (default from config, then 5000)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Print the response envelope on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum TopCommand {
    /// Write the default config file to ~/.gstc/config.toml
    ConfigInit,
    #[command(flatten)]
    Remote(Command),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing();

    match args.command {
        TopCommand::ConfigInit => run_config_init(),
        TopCommand::Remote(command) => {
            run_remote(command, args.host, args.port, args.compact).await
        }
    }
}

fn init_tracing() {
    // GSTC_DEBUG=1 forces debug output; otherwise RUST_LOG, then warn
    let show_debug = std::env::var("GSTC_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let env_filter = if show_debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

fn run_config_init() -> Result<()> {
    let path = default_config_path()?;
    write_default_config(&path).user_context_with_suggestion(
        "Could not write the default configuration",
        "Edit the existing file instead, or remove it and run `gstc config-init` again",
    )?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn run_remote(
    command: Command,
    host: Option<String>,
    port: Option<u16>,
    compact: bool,
) -> Result<()> {
    let config = load_config()
        .user_context_with_suggestion(
            "Failed to load ~/.gstc/config.toml",
            "Check the file syntax, or pass --host and --port explicitly",
        )?
        .with_overrides(host, port);

    let client = DaemonClient::from_config(&config);

    match run_command(&client, &command).await {
        Ok(envelope) => {
            println!("{}", format_envelope(&envelope, compact));
            Ok(())
        }
        Err(e) => {
            if e.kind() == Some(ErrorCode::Unreachable) {
                eprintln!("{}", unreachable_hint(client.base_url()));
            } else {
                eprintln!("{}", daemon_error_hint(&e));
            }
            std::process::exit(1);
        }
    }
}

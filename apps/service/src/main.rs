use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info, warn};

use nodewatch::config::{FileConfig, Overrides, WatchConfig, parse_duration};
use nodewatch::monitoring::{CheckController, HttpStatusFetcher, scheduler};
use nodewatch::notify::TelegramNotifier;

/// Uptime alerts for a fixed set of nodes.
#[derive(Debug, Parser)]
#[command(name = "nodewatch", author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Config file path (default: $XDG_CONFIG_HOME/nodewatch/config.toml).
    #[arg(long, global = true, value_name = "PATH", env = "NODEWATCH_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Starts the server.
    Serve(ServeArgs),
    /// Print the effective configuration and exit.
    Config(ServeArgs),
}

#[derive(Debug, Clone, Args)]
struct ServeArgs {
    /// Interval duration (e.g. 1h, 15m, 90s).
    #[arg(short, long, env = "NODEWATCH_INTERVAL", value_parser = parse_duration)]
    interval: Option<Duration>,
    /// Telegram token.
    #[arg(short = 't', long, env = "NODEWATCH_TELEGRAM_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,
    /// Telegram chat ID.
    #[arg(short, long, env = "NODEWATCH_CHAT_ID", allow_negative_numbers = true)]
    chat_id: Option<i64>,
    /// Node keys, repeat the flag or separate with commas.
    #[arg(short, long, env = "NODEWATCH_KEYS", value_delimiter = ',')]
    keys: Vec<String>,
    /// Uptime tracker endpoint.
    #[arg(long, env = "NODEWATCH_STATUS_URL", value_name = "URL")]
    status_url: Option<String>,
    /// Timeout for every outbound request.
    #[arg(long, env = "NODEWATCH_TIMEOUT", value_parser = parse_duration)]
    timeout: Option<Duration>,
    /// Telegram Bot API base URL.
    #[arg(long, env = "NODEWATCH_TELEGRAM_API_URL", value_name = "URL")]
    telegram_api_url: Option<String>,
}

impl From<ServeArgs> for Overrides {
    fn from(args: ServeArgs) -> Self {
        Overrides {
            interval: args.interval,
            timeout: args.timeout,
            status_url: args.status_url,
            keys: Some(args.keys).filter(|keys| !keys.is_empty()),
            telegram_token: args.telegram_token,
            chat_id: args.chat_id,
            telegram_api_url: args.telegram_api_url,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config(args) => {
            let config = load_config(cli.config, args)?;
            print!("{config}");
            Ok(())
        }
        Command::Serve(args) => serve(load_config(cli.config, args)?).await,
    }
}

fn load_config(path: Option<PathBuf>, args: ServeArgs) -> Result<WatchConfig> {
    let file = FileConfig::load(path).context("failed to load configuration file")?;
    WatchConfig::resolve(file, args.into()).context("invalid configuration")
}

async fn serve(config: WatchConfig) -> Result<()> {
    debug!("{config}");

    let notifier = TelegramNotifier::connect(
        config.telegram.api_url.clone(),
        &config.telegram.token,
        config.request_timeout,
    )
    .await
    .context("failed to authorize Telegram bot")?;

    let fetcher = HttpStatusFetcher::new(config.status_url.clone(), config.request_timeout)
        .context("failed to build status client")?;

    let controller = CheckController::new(config.keys, fetcher, notifier, config.telegram.chat_id);

    info!("Server started, watching {} nodes", controller.keys().len());
    controller.announce_start().await.context("failed to send startup message")?;

    scheduler::run(&controller, config.interval, shutdown_signal())
        .await
        .context("monitoring stopped")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, only a kill will stop the server: {e}");
        std::future::pending::<()>().await;
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  apiwatch — live API traffic observability dashboard
//
//  Engine:  session-owned event log + rolling stats + projections
//  Stream:  WebSocket consumer with one-shot backlog replay
//  Config:  YAML / APIWATCH_ env overrides
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use apiwatch_core::config::DashboardConfig;
use apiwatch_dashboard::render::LinePrinter;
use apiwatch_dashboard::session::DashboardSession;
use apiwatch_stream::connection::LiveConnection;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "apiwatch", version, about = "apiwatch — live API traffic dashboard")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "apiwatch.yaml")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Collector WebSocket URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Username for the collector session gate
    #[arg(long)]
    username: Option<String>,

    /// Password for the collector session gate
    #[arg(long)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "apiwatch starting");

    // ── Config ──
    let mut config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        DashboardConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        DashboardConfig::default()
    };
    if let Some(url) = cli.url {
        config.collector.ws_url = url;
    }

    // ── Session ──
    let mut session = DashboardSession::new(&config);

    // ── Session gate: the stream only opens after a successful login ──
    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        if !session.client().login(username, password).await? {
            anyhow::bail!("login rejected by collector");
        }
    }

    // ── Live stream ──
    let mut connection = LiveConnection::new(&config.collector.ws_url, config.stream.clone());
    let mut gateway = LinePrinter::new(std::io::stdout());

    info!(url = %config.collector.ws_url, "apiwatch is ready — watching traffic");

    let result = apiwatch_dashboard::run(&mut session, &mut connection, &mut gateway).await;

    // ── Tear-down: the session owns its state to the end ──
    session.reset_local();

    match result {
        Ok(()) => {}
        Err(apiwatch_core::WatchError::ConnectionClosed(reason)) => {
            info!(reason = %reason, "Collector closed the stream");
        }
        Err(e) => return Err(e.into()),
    }

    info!("apiwatch stopped");
    Ok(())
}

//! USD Rates
//!
//! Main entry point. Opens the local rate history, fetches the current
//! listing, keeps polling in the background and lets the user browse the
//! history from the terminal.

use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use usd_rates::config::AppConfig;
use usd_rates::database::{create_pool, initialize};
use usd_rates::error::{AppError, AppResult};
use usd_rates::services::{RateFetcher, RatePoller};
use usd_rates::session::{Command, Session, HELP};
use usd_rates::AppState;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Logs go to stderr so they do not interleave with the rendered tables
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("usd_rates={},sqlx=warn", config.log_level).into());
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    info!("USD rates starting");
    info!("Log level: {}", config.log_level);
    info!("Store: {}", config.database_path().display());
    info!("Source: {}", config.fetch.api_url);
    info!("Navigation: {}", config.navigation_mode.as_str());

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to open rate store: {}", e);
        AppError::Database(e)
    })?;

    initialize(&pool).await.map_err(|e| {
        error!("Schema initialization failed: {}", e);
        AppError::Database(e)
    })?;

    let app_state = Arc::new(AppState::new(pool, config.navigation_mode));
    info!("✓ Rate store ready");

    // =========================================================================
    // BACKGROUND POLLING
    // =========================================================================
    let fetcher = Arc::new(RateFetcher::new(&config.fetch)?);

    let poller = RatePoller::new(fetcher.clone(), app_state.snapshot_service.clone())
        .with_poll_interval(config.fetch.poll_interval());
    let poller_handle = tokio::spawn(async move {
        poller.start().await;
    });
    info!("✓ Rate poller started ({:?})", config.fetch.poll_interval());

    // =========================================================================
    // TERMINAL SESSION
    // =========================================================================
    let mut session = Session::new(
        app_state.navigator.clone(),
        app_state.snapshot_service.clone(),
        Some(fetcher),
    );

    print_output(HELP)?;
    print_output(&session.execute(Command::Refresh).await)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => print_output(&session.execute(command).await)?,
                    Err(message) => print_output(&format!("{}\n", message))?,
                }
            }
        }
    }

    // =========================================================================
    // SHUTDOWN
    // =========================================================================
    poller_handle.abort();
    app_state.database.close().await;

    info!("USD rates shutdown complete");
    Ok(())
}

fn print_output(text: &str) -> AppResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

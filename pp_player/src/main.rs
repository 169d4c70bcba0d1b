//! Poker player service.
//!
//! Serves the bot protocol over HTTP and answers every bet request with the
//! `poker_player` engine.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use log::info;
use pico_args::Arguments;
use poker_player::{Player, bot::RngSource};
use pp_player::{api, config::PlayerConfig, logging, metrics};

const HELP: &str = "\
Run the poker player service

USAGE:
  pp_player [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Service bind address  [default: env PLAYER_BIND or 0.0.0.0:1337]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  PLAYER_BIND              Service bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  PLAYER_HEADS_UP_STYLE    trap | counter
  PLAYER_RNG_SEED          Seed for reproducible play
  RUST_LOG                 Log filter (e.g., poker_player=debug)
  (See .env.example for all configuration options)
";

struct Args {
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs
            .opt_value_from_str("--bind")
            .context("Invalid --bind address")?,
    };

    logging::init();

    let config = PlayerConfig::from_env(args.bind)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(Error::msg)?;
        info!("Prometheus metrics at http://{addr}/metrics");
    }

    let rng = match config.rng_seed {
        Some(seed) => {
            info!("Seeding decisions with {seed}");
            RngSource::seeded(seed)
        }
        None => RngSource::from_entropy(),
    };
    info!(
        "Heads-up style: {}, aggressive table above {}",
        config.decision.heads_up_style, config.decision.aggressive_table
    );
    let player = Arc::new(Player::with_rng(config.decision.clone(), rng));

    let app = api::create_router(api::AppState {
        player: player.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "{} listening at http://{}. Press Ctrl+C to stop.",
        player.version(),
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!(
        "Shutting down with {} opponent profile(s)",
        player.profiles().len()
    );

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {err}");
        std::future::pending::<()>().await;
    }
}

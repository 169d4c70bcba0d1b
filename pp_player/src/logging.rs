//! Structured logging configuration.
//!
//! The engine logs through the `log` facade; the subscriber installed here
//! picks those records up alongside the service's own `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,hyper=warn";

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var, e.g.
/// `RUST_LOG=poker_player=debug` to trace every decision.
///
/// # Example
///
/// ```no_run
/// use pp_player::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Player starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a bet answered by the engine
pub fn log_bet(game_id: &str, bet_index: u32, amount: u32, tier: &str) {
    tracing::info!(
        game_id = game_id,
        bet_index = bet_index,
        amount = amount,
        tier = tier,
        "Bet request answered"
    );
}

/// Log a request body that couldn't be used
pub fn log_rejected_state(action: &str, reason: &str) {
    tracing::warn!(action = action, reason = reason, "Rejected game state");
}

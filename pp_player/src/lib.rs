//! HTTP service exposing the `poker_player` engine through the tournament
//! host's bot protocol.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;

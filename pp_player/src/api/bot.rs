//! Bot protocol handler.
//!
//! The tournament host talks to the player through a single form-encoded
//! `POST /` carrying an `action` and, for game events, a JSON `game_state`:
//!
//! ```bash
//! curl -X POST http://localhost:1337/ \
//!   --data-urlencode 'action=bet_request' \
//!   --data-urlencode 'game_state={"game_id": "g1", ...}'
//! ```
//!
//! | action        | response                         |
//! |---------------|----------------------------------|
//! | `check`       | `200 OK`                         |
//! | `version`     | player version string            |
//! | `bet_request` | bet in chips, `0` to fold/check  |
//! | `showdown`    | `200 OK`                         |

use axum::{
    Form,
    extract::State,
    http::StatusCode,
};
use poker_player::{SnapshotError, TableSnapshot};
use serde::Deserialize;
use std::{fmt, str::FromStr};

use super::{AppState, request_id::RequestId};
use crate::{logging, metrics};

/// Body returned for acknowledgements
pub const ACK: &str = "OK";

#[derive(Debug, Deserialize)]
pub struct BotRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub game_state: Option<String>,
}

/// Actions of the bot protocol
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BotAction {
    Check,
    Version,
    BetRequest,
    Showdown,
}

impl BotAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Version => "version",
            Self::BetRequest => "bet_request",
            Self::Showdown => "showdown",
        }
    }
}

impl fmt::Display for BotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BotAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Self::Check),
            "version" => Ok(Self::Version),
            "bet_request" => Ok(Self::BetRequest),
            "showdown" => Ok(Self::Showdown),
            other => Err(format!("Unknown action: {other:?}")),
        }
    }
}

fn parse_state(game_state: Option<&str>) -> Result<TableSnapshot, SnapshotError> {
    // A missing field parses like an empty document and fails the same way
    TableSnapshot::from_json(game_state.unwrap_or_default())
}

/// Handle one protocol request.
///
/// # Response
///
/// Unknown actions and unusable showdown states are answered with
/// `400 Bad Request`. An unusable bet request state is answered with `0`: a
/// fold is always a legal reply.
pub async fn handle(
    State(state): State<AppState>,
    request_id: RequestId,
    Form(request): Form<BotRequest>,
) -> Result<String, (StatusCode, String)> {
    let action: BotAction = request
        .action
        .parse()
        .map_err(|err: String| (StatusCode::BAD_REQUEST, err))?;
    metrics::requests_total(action.as_str());

    match action {
        BotAction::Check => Ok(ACK.to_string()),
        BotAction::Version => Ok(state.player.version().to_string()),
        BotAction::BetRequest => {
            let snapshot = match parse_state(request.game_state.as_deref()) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    tracing::warn!(%request_id, "Folding on bad state");
                    logging::log_rejected_state(action.as_str(), &err.to_string());
                    metrics::rejected_states_total(action.as_str());
                    return Ok("0".to_string());
                }
            };

            let decision = state.player.bet_request(&snapshot);
            let tier = decision.tier.to_string();
            logging::log_bet(&snapshot.game_id, snapshot.bet_index, decision.amount, &tier);
            metrics::decisions_total(&tier, &decision.play.to_string());
            metrics::bet_size_chips(decision.amount);
            metrics::profiled_opponents(state.player.profiles().len());

            Ok(decision.amount.to_string())
        }
        BotAction::Showdown => {
            let snapshot = parse_state(request.game_state.as_deref()).map_err(|err| {
                logging::log_rejected_state(action.as_str(), &err.to_string());
                metrics::rejected_states_total(action.as_str());
                (StatusCode::BAD_REQUEST, format!("Invalid game_state: {err}"))
            })?;

            state.player.on_showdown(&snapshot);
            metrics::showdowns_total();
            tracing::info!(
                %request_id,
                game_id = %snapshot.game_id,
                "Showdown recorded"
            );

            Ok(ACK.to_string())
        }
    }
}

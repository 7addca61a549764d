//! Raw payloads exchanged with the gotak service.
//!
//! The service is written in Go and serializes with exported (capitalized)
//! field names, while some deployments emit camelCase. Each field accepts
//! both spellings; anything else is not recognized. Required fields fail
//! decoding when absent. See [`WIRE_SCHEMA_VERSION`].

use crate::error::{ClientError, ClientErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Version of the wire-to-canonical field mapping implemented here.
pub const WIRE_SCHEMA_VERSION: u32 = 1;

/// Game identifier: numeric in the Go service, textual elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric identifier.
    Number(i64),
    /// Textual identifier.
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A game as returned by every game endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGame {
    /// Identifier.
    #[serde(rename = "ID", alias = "id")]
    pub id: RawId,
    /// Public slug.
    #[serde(rename = "Slug", alias = "slug")]
    pub slug: String,
    /// Board snapshot.
    #[serde(rename = "Board", alias = "board")]
    pub board: RawBoard,
    /// Turn log; `null` or absent for a new game.
    #[serde(rename = "Turns", alias = "turns", default)]
    pub turns: Option<Vec<RawTurn>>,
    /// Tags.
    #[serde(rename = "Meta", alias = "meta", default)]
    pub meta: Option<Vec<RawTag>>,
}

/// Board snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBoard {
    /// Edge length.
    #[serde(rename = "Size", alias = "size")]
    pub size: u8,
    /// Stacks keyed by square label, bottom first.
    #[serde(rename = "Squares", alias = "squares", default)]
    pub squares: Option<BTreeMap<String, Vec<RawStone>>>,
}

/// Stone in a board snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStone {
    /// 1-based player index.
    #[serde(rename = "Player", alias = "player")]
    pub player: u8,
    /// Stone-kind code.
    #[serde(rename = "Type", alias = "type")]
    pub kind: String,
}

/// One turn of the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTurn {
    /// Turn number.
    #[serde(rename = "Number", alias = "number")]
    pub number: u32,
    /// Player one's move.
    #[serde(rename = "First", alias = "first")]
    pub first: RawMove,
    /// Player two's move.
    #[serde(rename = "Second", alias = "second", default)]
    pub second: Option<RawMove>,
    /// Result tag on the final turn.
    #[serde(rename = "Result", alias = "result", default)]
    pub result: Option<String>,
}

/// One move.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMove {
    /// Target (placement) or source (spread) square label.
    #[serde(rename = "Square", alias = "square")]
    pub square: String,
    /// Stone-kind code; empty for an unprefixed placement.
    #[serde(rename = "Stone", alias = "stone", default)]
    pub stone: Option<String>,
    /// Free-text notation.
    #[serde(rename = "Text", alias = "text", default)]
    pub text: Option<String>,
    /// Spread direction symbol; empty for placements.
    #[serde(rename = "MoveDirection", alias = "moveDirection", default)]
    pub move_direction: Option<String>,
    /// Stones carried by a spread.
    #[serde(rename = "MoveCount", alias = "moveCount", default)]
    pub move_count: Option<u8>,
    /// Stones dropped per square by a spread.
    #[serde(rename = "MoveDropCounts", alias = "moveDropCounts", default)]
    pub move_drop_counts: Option<Vec<u8>>,
}

/// Key/value tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTag {
    /// Tag name.
    #[serde(rename = "Key", alias = "key")]
    pub key: String,
    /// Tag value.
    #[serde(rename = "Value", alias = "value", default)]
    pub value: String,
}

/// Body of `POST /game/new`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGameRequest {
    /// Board size.
    pub size: u8,
}

/// Body of `POST /game/{slug}/move`.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRequest {
    /// 1-based player index.
    pub player: u8,
    /// Target square label.
    #[serde(rename = "move")]
    pub square: String,
    /// Turn number the move claims to apply to.
    pub turn: u32,
}

/// Body of `POST /game/{slug}/join`.
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequest {
    /// Display name of the joining player.
    pub name: String,
}

/// Extracts the refusal message a service puts in an `error` field.
#[instrument(skip(body))]
pub fn error_message(body: &serde_json::Value) -> Option<String> {
    let field = body.get("error").or_else(|| body.get("Error"))?;
    match field {
        serde_json::Value::Null => None,
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(inner) => inner
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| Some(field.to_string())),
        other => Some(other.to_string()),
    }
}

/// Decodes a successful response body into a [`RawGame`].
///
/// # Errors
///
/// - [`ClientErrorKind::Rejected`] if the body reports an error instead of a
///   game.
/// - [`ClientErrorKind::MalformedHistory`] if the body is not JSON or lacks a
///   required field.
#[instrument(skip(body), fields(len = body.len()))]
pub fn parse_game(body: &str) -> Result<RawGame, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Response is not JSON");
        ClientError::new(ClientErrorKind::MalformedHistory(format!(
            "response is not JSON: {}",
            e
        )))
    })?;

    if let Some(reason) = error_message(&value) {
        warn!(reason = %reason, "Service reported an error");
        return Err(ClientError::new(ClientErrorKind::Rejected {
            status: None,
            reason,
        }));
    }

    let game: RawGame = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Response does not match wire schema");
        ClientError::new(ClientErrorKind::MalformedHistory(format!(
            "wire schema v{}: {}",
            WIRE_SCHEMA_VERSION, e
        )))
    })?;

    debug!(slug = %game.slug, size = game.board.size, "Decoded raw game");
    Ok(game)
}

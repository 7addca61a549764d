//! Normalizes raw service payloads into canonical [`GameState`]s.

use crate::config::BoardSource;
use crate::error::{ClientError, ClientErrorKind};
use crate::wire::{RawGame, RawMove, RawStone, RawTurn};
use gotak_board::{
    Board, Direction, GameState, Move, MoveAction, Player, Square, Stone, StoneKind, Turn,
    reconstruct,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Normalizes the response to a game creation.
///
/// A new game has no history, so its board is always replayed from the
/// (normally empty) turn log.
///
/// # Errors
///
/// Returns [`ClientErrorKind::MalformedHistory`]
/// if any field fails to decode or the history does not fit the board.
#[instrument(skip(raw), fields(slug = %raw.slug))]
pub fn normalize_created(raw: RawGame) -> Result<GameState, ClientError> {
    normalize(raw, BoardSource::Reconstructed)
}

/// Normalizes the response to a fetch, move or join.
///
/// With [`BoardSource::Authoritative`] the payload's board snapshot is used;
/// with [`BoardSource::Reconstructed`] it is ignored and the board is replayed
/// from the turn log.
///
/// # Errors
///
/// Returns [`ClientErrorKind::MalformedHistory`]
/// if any field fails to decode or the history does not fit the board.
#[instrument(skip(raw), fields(slug = %raw.slug))]
pub fn normalize_fetched(raw: RawGame, source: BoardSource) -> Result<GameState, ClientError> {
    normalize(raw, source)
}

fn normalize(raw: RawGame, source: BoardSource) -> Result<GameState, ClientError> {
    let size = raw.board.size;

    let mut turns = raw
        .turns
        .unwrap_or_default()
        .into_iter()
        .map(decode_turn)
        .collect::<Result<Vec<_>, _>>()?;
    turns.sort_by_key(|turn| *turn.number());

    for turn in &turns {
        for mv in turn.moves() {
            mv.square().check_within(size)?;
        }
    }

    let board = match source {
        BoardSource::Authoritative => {
            let stacks = raw
                .board
                .squares
                .unwrap_or_default()
                .into_iter()
                .map(|(label, stack)| decode_stack(&label, stack))
                .collect::<Result<Vec<_>, _>>()?;
            Board::from_stacks(size, stacks)?
        }
        BoardSource::Reconstructed => {
            let board = reconstruct(size, &turns)?;
            info!(
                turns = turns.len(),
                stones = board.stone_count(),
                "Board reconstructed from turn log"
            );
            board
        }
    };

    let meta: BTreeMap<String, String> = raw
        .meta
        .unwrap_or_default()
        .into_iter()
        .map(|tag| (tag.key, tag.value))
        .collect();

    debug!(size, turns = turns.len(), tags = meta.len(), ?source, "Normalized game");
    Ok(GameState::new(raw.id.to_string(), raw.slug, board, turns, meta))
}

fn decode_turn(raw: RawTurn) -> Result<Turn, ClientError> {
    let first = decode_move(raw.first)?;
    let second = raw.second.map(decode_move).transpose()?;
    let result = raw.result.filter(|tag| !tag.trim().is_empty());
    Ok(Turn::new(raw.number, first, second, result))
}

fn decode_move(raw: RawMove) -> Result<Move, ClientError> {
    let square: Square = raw.square.parse()?;

    let direction = raw.move_direction.as_deref().map(str::trim).unwrap_or("");
    let action = if direction.is_empty() {
        let code = raw.stone.as_deref().unwrap_or("");
        MoveAction::Place {
            stone: StoneKind::from_code(code)?,
        }
    } else {
        let drops = match (raw.move_drop_counts, raw.move_count) {
            (Some(drops), _) if !drops.is_empty() => drops,
            (_, Some(count)) => vec![count],
            _ => {
                return Err(ClientError::new(ClientErrorKind::MalformedHistory(format!(
                    "spread from {} has no stone counts",
                    square
                ))));
            }
        };
        MoveAction::Spread {
            direction: Direction::from_code(direction)?,
            drops,
        }
    };

    let text = raw.text.filter(|t| !t.is_empty()).unwrap_or_else(|| square.label());
    Ok(Move::new(square, action, text))
}

fn decode_stack(label: &str, stack: Vec<RawStone>) -> Result<(Square, Vec<Stone>), ClientError> {
    let square: Square = label.parse()?;
    let stones = stack
        .into_iter()
        .map(|raw| -> Result<Stone, ClientError> {
            let owner = Player::from_index(raw.player).ok_or_else(|| {
                ClientError::new(ClientErrorKind::MalformedHistory(format!(
                    "stone on {} has player {}",
                    label, raw.player
                )))
            })?;
            Ok(Stone::new(owner, StoneKind::from_code(&raw.kind)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((square, stones))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::parse_game;

    #[test]
    fn test_spread_decodes_with_drop_counts() {
        let raw: RawMove = serde_json::from_value(serde_json::json!({
            "Square": "a1",
            "MoveDirection": ">",
            "MoveCount": 3,
            "MoveDropCounts": [2, 1],
            "Text": "3a1>21"
        }))
        .unwrap();
        let mv = decode_move(raw).unwrap();
        assert_eq!(
            mv.action(),
            &MoveAction::Spread {
                direction: Direction::Right,
                drops: vec![2, 1]
            }
        );
        assert_eq!(mv.text(), "3a1>21");
    }

    #[test]
    fn test_placement_text_defaults_to_label() {
        let raw = RawMove {
            square: "b2".to_string(),
            stone: Some("C".to_string()),
            ..RawMove::default()
        };
        let mv = decode_move(raw).unwrap();
        assert_eq!(mv.placed_stone(), Some(StoneKind::Capstone));
        assert_eq!(mv.text(), "b2");
    }

    #[test]
    fn test_blank_result_is_dropped() {
        let game = parse_game(
            r#"{"ID":1,"Slug":"s","Board":{"Size":3},
                "Turns":[{"Number":1,"First":{"Square":"a1"},"Result":""}]}"#,
        )
        .unwrap();
        let state = normalize_fetched(game, BoardSource::Reconstructed).unwrap();
        assert_eq!(state.turns()[0].result(), &None);
    }
}

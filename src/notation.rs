//! Text notation for moves and initial setups.
//!
//! A move is written `x y O` or `x y O fx fy tx ty`: the anchor `(x, y)` of
//! the L, the orientation of its foot (`N`, `S`, `E`, `W`) and optionally a
//! neutral piece moved from `(fx, fy)` to `(tx, ty)`. For example
//! `1 2 E 4 3 1 1`.
//!
//! A setup lists Player 1's L, both neutral pieces and Player 2's L:
//! `3 1 W 1 1 4 4 2 4 E` is the standard starting position.

use crate::board::{BoardState, PlayerId};
use crate::error::{GameError, Result};
use crate::geometry::{Cell, Orientation, Placement, in_bounds};
use crate::movegen::{Move, NeutralRelocation};

fn parse_coord(token: &str) -> Result<i8> {
    token
        .parse::<i8>()
        .map_err(|_| GameError::Parse(format!("expected an integer coordinate, got {token:?}")))
}

/// Parse a cell, rejecting coordinates off the board.
fn parse_cell(x: &str, y: &str) -> Result<Cell> {
    let cell = (parse_coord(x)?, parse_coord(y)?);
    if !in_bounds(cell) {
        return Err(GameError::out_of_bounds(cell));
    }
    Ok(cell)
}

fn parse_placement(tokens: &[&str]) -> Result<Placement> {
    let anchor = parse_cell(tokens[0], tokens[1])?;
    let orientation: Orientation = tokens[2].parse()?;
    Ok(Placement::new(anchor, orientation))
}

/// Parse a move such as `1 2 E` or `1 2 E 4 3 1 1`.
///
/// Syntax and coordinate ranges are checked here; legality is the board's
/// concern.
pub fn parse_move(input: &str) -> Result<Move> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    match tokens.len() {
        3 | 7 => {}
        n => {
            return Err(GameError::Parse(format!(
                "a move has 3 or 7 fields (e.g. '1 2 E' or '1 2 E 4 3 1 1'), got {n}"
            )));
        }
    }

    let placement = parse_placement(&tokens[..3])?;
    let neutral = if tokens.len() == 7 {
        Some(NeutralRelocation {
            from: parse_cell(tokens[3], tokens[4])?,
            to: parse_cell(tokens[5], tokens[6])?,
        })
    } else {
        None
    };
    Ok(Move { placement, neutral })
}

/// Format a move in the notation accepted by [`parse_move`].
pub fn format_move(mv: &Move) -> String {
    mv.to_string()
}

/// Parse a 10-field setup such as `3 1 W 1 1 4 4 2 4 E`. Player 1 moves first.
///
/// # Errors
/// Malformed text yields [`GameError::Parse`] or
/// [`GameError::InvalidOrientation`]; an invalid position yields
/// [`GameError::OutOfBounds`] or [`GameError::OverlappingInitialState`].
pub fn parse_setup(input: &str) -> Result<BoardState> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.len() != 10 {
        return Err(GameError::Parse(format!(
            "a setup has exactly 10 fields, got {}",
            tokens.len()
        )));
    }

    let p1 = parse_placement(&tokens[0..3])?;
    let n1 = parse_cell(tokens[3], tokens[4])?;
    let n2 = parse_cell(tokens[5], tokens[6])?;
    let p2 = parse_placement(&tokens[7..10])?;
    BoardState::from_placements(p1, [n1, n2], p2)
}

/// Format a position as a setup string. The turn is not part of the notation.
pub fn format_setup(state: &BoardState) -> Option<String> {
    let p1 = state.piece(PlayerId::Player1).placement()?;
    let p2 = state.piece(PlayerId::Player2).placement()?;
    let [(ax, ay), (bx, by)] = *state.neutrals();
    Some(format!("{p1} {ax} {ay} {bx} {by} {p2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SETUP;

    #[test]
    fn test_parse_simple_move() {
        let mv = parse_move("1 2 E").unwrap();
        assert_eq!(mv, Move::new((1, 2), Orientation::East));
    }

    #[test]
    fn test_parse_move_with_neutral() {
        let mv = parse_move("  1 2 e 4 3 1 1 ").unwrap();
        assert_eq!(
            mv,
            Move::new((1, 2), Orientation::East).with_neutral((4, 3), (1, 1))
        );
        assert_eq!(format_move(&mv), "1 2 E 4 3 1 1");
    }

    #[test]
    fn test_parse_move_errors() {
        assert!(matches!(parse_move(""), Err(GameError::Parse(_))));
        assert!(matches!(parse_move("1 2"), Err(GameError::Parse(_))));
        assert!(matches!(parse_move("1 2 E 4 3"), Err(GameError::Parse(_))));
        assert!(matches!(parse_move("a 2 E"), Err(GameError::Parse(_))));
        assert!(matches!(
            parse_move("1 2 Q"),
            Err(GameError::InvalidOrientation(_))
        ));
    }

    #[test]
    fn test_coordinates_off_the_board() {
        assert_eq!(
            parse_move("127 1 E"),
            Err(GameError::OutOfBounds { x: 127, y: 1 })
        );
        assert_eq!(
            parse_move("1 2 E 4 3 0 1"),
            Err(GameError::OutOfBounds { x: 0, y: 1 })
        );
        assert_eq!(
            parse_setup("1 126 E 1 1 4 4 2 4 E"),
            Err(GameError::OutOfBounds { x: 1, y: 126 })
        );
        assert_eq!(
            parse_setup("127 1 E 1 1 4 4 2 4 E"),
            Err(GameError::OutOfBounds { x: 127, y: 1 })
        );
        // Does not fit in a coordinate at all
        assert!(matches!(parse_move("300 1 E"), Err(GameError::Parse(_))));
    }

    #[test]
    fn test_default_setup() {
        assert_eq!(parse_setup(DEFAULT_SETUP).unwrap(), BoardState::default());
        assert_eq!(
            format_setup(&BoardState::default()).as_deref(),
            Some(DEFAULT_SETUP)
        );
    }

    #[test]
    fn test_setup_errors() {
        assert!(matches!(
            parse_setup("3 1 W 1 1 4 4"),
            Err(GameError::Parse(_))
        ));
        assert_eq!(
            parse_setup("3 1 W 2 1 4 4 2 4 E"),
            Err(GameError::OverlappingInitialState)
        );
        assert!(matches!(
            parse_setup("1 1 N 1 3 4 4 2 4 E"),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_setup_roundtrip() {
        let setup = "1 2 N 2 1 4 3 1 3 S";
        let state = parse_setup(setup).unwrap();
        let formatted = format_setup(&state).unwrap();
        assert_eq!(parse_setup(&formatted).unwrap(), state);
    }
}

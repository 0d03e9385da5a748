//! Heuristic evaluation of board states.
//!
//! The score combines mobility (how many moves each side has) with a small
//! positional term that favours the centre and neutral pieces that crowd the
//! opponent. Terminal states score [`WIN_SCORE`] or [`LOSS_SCORE`].

use crate::board::{BoardState, PlayerId};
use crate::constants::{
    CENTER_CELL_BONUS, CENTER_MAX, CENTER_MIN, EDGE_CELL_BONUS, LOSS_SCORE, MOBILITY_WEIGHT,
    NEUTRAL_BLOCK_BONUS, NEUTRAL_CENTER_BONUS, Score, WIN_SCORE,
};
use crate::geometry::{Cell, adjacent};
use crate::movegen::{Rules, count_legal_moves};

/// Whether a cell lies in the central 2x2 region.
#[inline]
pub fn is_center((x, y): Cell) -> bool {
    (CENTER_MIN..=CENTER_MAX).contains(&x) && (CENTER_MIN..=CENTER_MAX).contains(&y)
}

/// Number of legal moves available to `player`.
#[inline]
pub fn mobility(state: &BoardState, player: PlayerId, rules: Rules) -> Score {
    count_legal_moves(state, player, rules) as Score
}

/// Positional bonus for `player`.
///
/// L cells score 2 in the centre and 1 elsewhere. Each neutral piece scores 1
/// in the centre, plus 2 when it touches the opponent's L.
pub fn positional_bonus(state: &BoardState, player: PlayerId) -> Score {
    let piece_bonus: Score = state
        .piece(player)
        .cells()
        .iter()
        .map(|&c| {
            if is_center(c) {
                CENTER_CELL_BONUS
            } else {
                EDGE_CELL_BONUS
            }
        })
        .sum();

    let opp = state.piece(player.opponent());
    let neutral_bonus: Score = state
        .neutrals()
        .iter()
        .map(|&n| {
            let mut bonus = 0;
            if is_center(n) {
                bonus += NEUTRAL_CENTER_BONUS;
            }
            if opp.cells().iter().any(|&c| adjacent(n, c)) {
                bonus += NEUTRAL_BLOCK_BONUS;
            }
            bonus
        })
        .sum();

    piece_bonus + neutral_bonus
}

/// Score `state` from `perspective`'s point of view.
///
/// If the player to move has no legal move the game is over: that player has
/// lost. Otherwise the score is
/// `10 * (mobility(p) - mobility(opp)) + bonus(p) - bonus(opp)`.
pub fn evaluate(state: &BoardState, perspective: PlayerId, rules: Rules) -> Score {
    let mover = state.turn();
    let mover_mobility = mobility(state, mover, rules);
    if mover_mobility == 0 {
        return if mover == perspective {
            LOSS_SCORE
        } else {
            WIN_SCORE
        };
    }

    let other_mobility = mobility(state, mover.opponent(), rules);
    let (own, opp) = if mover == perspective {
        (mover_mobility, other_mobility)
    } else {
        (other_mobility, mover_mobility)
    };

    MOBILITY_WEIGHT * (own - opp) + positional_bonus(state, perspective)
        - positional_bonus(state, perspective.opponent())
}

//! Legal move generation.
//!
//! A move places the mover's L-piece somewhere new and optionally relocates one
//! neutral piece. Generation is exhaustive and deterministic:
//!
//! 1. anchors in order `x` = 1..4 (outer), `y` = 1..4 (inner), orientations
//!    N, S, E, W; placements that leave the board, cover the opponent or a
//!    neutral, or leave the piece where it already is are skipped,
//! 2. for each surviving placement: first "no relocation" (unless the rules
//!    make relocation mandatory), then each neutral in sorted order moved to
//!    each free target cell in board order.
//!
//! Legality is checked with plain predicates; nothing on this path allocates
//! errors.

use std::fmt;

use crate::board::{BoardState, LPiece, PlayerId, is_placement_legal};
use crate::constants::DEFAULT_NEUTRAL_RULE;
use crate::geometry::{Cell, Orientation, Placement, all_cells};

/// Whether a move must relocate a neutral piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NeutralRule {
    /// A move may relocate one neutral piece or leave both in place.
    Optional,
    /// Every move relocates exactly one neutral piece.
    Mandatory,
}

/// The rule set the generator works under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rules {
    pub neutral_rule: NeutralRule,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(DEFAULT_NEUTRAL_RULE)
    }
}

impl Rules {
    pub fn new(neutral_rule: NeutralRule) -> Self {
        Self { neutral_rule }
    }

    /// Rules with mandatory neutral relocation.
    pub fn mandatory() -> Self {
        Self::new(NeutralRule::Mandatory)
    }
}

/// A neutral piece moving from one cell to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NeutralRelocation {
    pub from: Cell,
    pub to: Cell,
}

/// A complete move: where the L goes, and which neutral piece moves (if any).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub placement: Placement,
    pub neutral: Option<NeutralRelocation>,
}

impl Move {
    pub fn new(anchor: Cell, orientation: Orientation) -> Self {
        Self {
            placement: Placement::new(anchor, orientation),
            neutral: None,
        }
    }

    /// The same placement, also moving the neutral piece at `from` to `to`.
    pub fn with_neutral(mut self, from: Cell, to: Cell) -> Self {
        self.neutral = Some(NeutralRelocation { from, to });
        self
    }
}

impl fmt::Display for Move {
    /// Move notation: `x y O` or `x y O fx fy tx ty`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placement)?;
        if let Some(NeutralRelocation { from, to }) = self.neutral {
            write!(f, " {} {} {} {}", from.0, from.1, to.0, to.1)?;
        }
        Ok(())
    }
}

/// All placements `player` may move their L-piece to, with the resulting piece.
///
/// Distinct entries always cover distinct cell sets.
pub fn legal_placements(state: &BoardState, player: PlayerId) -> Vec<(Placement, LPiece)> {
    let current = *state.piece(player);
    let others = state.occupied_by_others(player);
    let mut out: Vec<(Placement, LPiece)> = Vec::with_capacity(16);

    for anchor in all_cells() {
        for orientation in Orientation::ALL {
            let placement = Placement::new(anchor, orientation);
            let cells = placement.cells();
            if !is_placement_legal(&cells, &others) {
                continue;
            }
            let piece = LPiece::from_cells(cells);
            if piece == current || out.iter().any(|(_, p)| *p == piece) {
                continue;
            }
            out.push((placement, piece));
        }
    }
    out
}

/// Neutral relocations available once the mover's piece sits at `new_piece`.
fn neutral_relocations(
    state: &BoardState,
    player: PlayerId,
    new_piece: &LPiece,
) -> impl Iterator<Item = NeutralRelocation> {
    let opp = *state.piece(player.opponent());
    let neutrals = *state.neutrals();
    let new_piece = *new_piece;

    neutrals.into_iter().enumerate().flat_map(move |(i, from)| {
        let other = neutrals[1 - i];
        all_cells()
            .filter(move |&to| {
                to != from && to != other && !new_piece.contains(to) && !opp.contains(to)
            })
            .map(move |to| NeutralRelocation { from, to })
    })
}

/// Enumerate every legal move for `player` in `state`.
pub fn legal_moves(state: &BoardState, player: PlayerId, rules: Rules) -> Vec<Move> {
    let mut moves = Vec::new();
    for (placement, piece) in legal_placements(state, player) {
        if rules.neutral_rule == NeutralRule::Optional {
            moves.push(Move {
                placement,
                neutral: None,
            });
        }
        moves.extend(
            neutral_relocations(state, player, &piece).map(|relocation| Move {
                placement,
                neutral: Some(relocation),
            }),
        );
    }
    moves
}

/// Number of legal moves for `player`, without building them.
pub fn count_legal_moves(state: &BoardState, player: PlayerId, rules: Rules) -> usize {
    let free_for_none = match rules.neutral_rule {
        NeutralRule::Optional => 1,
        NeutralRule::Mandatory => 0,
    };
    legal_placements(state, player)
        .iter()
        .map(|(_, piece)| free_for_none + neutral_relocations(state, player, piece).count())
        .sum()
}

/// Whether `player` has no legal move. There is no pass: such a player has lost.
pub fn is_terminal(state: &BoardState, player: PlayerId, rules: Rules) -> bool {
    count_legal_moves(state, player, rules) == 0
}

/// Whether `mv` is legal for `player` under `rules`.
pub fn is_legal(state: &BoardState, player: PlayerId, mv: &Move, rules: Rules) -> bool {
    if mv.neutral.is_none() && rules.neutral_rule == NeutralRule::Mandatory {
        return false;
    }
    state.with_turn(player).apply(mv).is_ok()
}

//! Board state representation and validation.
//!
//! A [`BoardState`] is a small `Copy` value: both players' L-pieces, the two
//! neutral pieces and the player to move. Every transition builds a new value;
//! nothing is ever mutated in place.
//!
//! Cells of an L-piece and the two neutral cells are kept sorted, so equality
//! and hashing ignore the order in which cells were produced.

use std::fmt;

use crate::constants::N;
use crate::error::{GameError, Result};
use crate::geometry::{Cell, Orientation, Placement, all_cells, in_bounds};
use crate::movegen::{Move, NeutralRelocation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    /// Both players in turn order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    /// 1-based player number, as shown to users.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// The 4 cells of one L-piece, sorted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LPiece {
    cells: [Cell; 4],
}

impl LPiece {
    /// Build the piece covering `placement`. Cells may be off the board.
    pub fn from_placement(placement: Placement) -> Self {
        Self::from_cells(placement.cells())
    }

    pub(crate) fn from_cells(mut cells: [Cell; 4]) -> Self {
        cells.sort_unstable();
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; 4] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// First `(anchor, orientation)` pair, in generation order, that produces
    /// this piece.
    pub fn placement(&self) -> Option<Placement> {
        all_cells()
            .flat_map(|anchor| Orientation::ALL.map(|o| Placement::new(anchor, o)))
            .find(|p| LPiece::from_placement(*p) == *self)
    }
}

/// Whether `candidate` fits on the board without touching `occupied_by_others`.
#[inline]
pub fn is_placement_legal(candidate: &[Cell; 4], occupied_by_others: &[Cell]) -> bool {
    candidate
        .iter()
        .all(|&c| in_bounds(c) && !occupied_by_others.contains(&c))
}

/// A complete game position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    pieces: [LPiece; 2],
    neutrals: [Cell; 2],
    turn: PlayerId,
}

impl Default for BoardState {
    /// Player 1 at (3,1) West, neutrals at (1,1) and (4,4), Player 2 at (2,4)
    /// East, Player 1 to move.
    fn default() -> Self {
        Self {
            pieces: [
                LPiece::from_placement(Placement::new((3, 1), Orientation::West)),
                LPiece::from_placement(Placement::new((2, 4), Orientation::East)),
            ],
            neutrals: [(1, 1), (4, 4)],
            turn: PlayerId::Player1,
        }
    }
}

impl BoardState {
    /// Build and validate a position.
    ///
    /// # Errors
    /// - [`GameError::OutOfBounds`] if any cell lies off the board
    /// - [`GameError::OverlappingInitialState`] if any two cells coincide
    pub fn new(p1: LPiece, p2: LPiece, neutrals: [Cell; 2], turn: PlayerId) -> Result<Self> {
        let all: Vec<Cell> = p1
            .cells()
            .iter()
            .chain(p2.cells())
            .chain(&neutrals)
            .copied()
            .collect();

        if let Some(&off) = all.iter().find(|&&c| !in_bounds(c)) {
            return Err(GameError::out_of_bounds(off));
        }
        for (i, a) in all.iter().enumerate() {
            if all[i + 1..].contains(a) {
                return Err(GameError::OverlappingInitialState);
            }
        }

        Ok(Self {
            pieces: [p1, p2],
            neutrals: sort_pair(neutrals),
            turn,
        })
    }

    /// Build a position from both players' placements, Player 1 to move.
    pub fn from_placements(p1: Placement, neutrals: [Cell; 2], p2: Placement) -> Result<Self> {
        Self::new(
            LPiece::from_placement(p1),
            LPiece::from_placement(p2),
            neutrals,
            PlayerId::Player1,
        )
    }

    #[inline]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    #[inline]
    pub fn piece(&self, player: PlayerId) -> &LPiece {
        &self.pieces[player.index()]
    }

    #[inline]
    pub fn neutrals(&self) -> &[Cell; 2] {
        &self.neutrals
    }

    /// The same position with `player` to move.
    pub fn with_turn(&self, player: PlayerId) -> Self {
        Self {
            turn: player,
            ..*self
        }
    }

    /// Cells `player` may not cover: the opponent's piece and both neutrals.
    pub fn occupied_by_others(&self, player: PlayerId) -> [Cell; 6] {
        let opp = self.piece(player.opponent()).cells();
        [
            opp[0],
            opp[1],
            opp[2],
            opp[3],
            self.neutrals[0],
            self.neutrals[1],
        ]
    }

    /// What occupies `cell`, if anything.
    pub fn occupant(&self, cell: Cell) -> Option<Occupant> {
        if self.neutrals.contains(&cell) {
            return Some(Occupant::Neutral);
        }
        PlayerId::BOTH
            .into_iter()
            .find(|&p| self.piece(p).contains(cell))
            .map(Occupant::Piece)
    }

    /// Apply a move for the player to move, checking every rule.
    ///
    /// Neutral-rule constraints (mandatory relocation) are the move
    /// generator's concern; see [`crate::movegen::is_legal`].
    ///
    /// # Errors
    /// Returns [`GameError::IllegalMove`] describing the first violated rule.
    pub fn apply(&self, mv: &Move) -> Result<Self> {
        let player = self.turn;
        let new_piece = LPiece::from_placement(mv.placement);
        let opp = self.piece(player.opponent());

        if !new_piece.cells().iter().all(|&c| in_bounds(c)) {
            return Err(GameError::IllegalMove(format!(
                "{} leaves the board",
                mv.placement
            )));
        }
        if !is_placement_legal(new_piece.cells(), &self.occupied_by_others(player)) {
            return Err(GameError::IllegalMove(format!(
                "{} covers an occupied cell",
                mv.placement
            )));
        }
        if new_piece == *self.piece(player) {
            return Err(GameError::IllegalMove(
                "the piece must move to a new position".to_string(),
            ));
        }
        if let Some(NeutralRelocation { from, to }) = mv.neutral {
            if !self.neutrals.contains(&from) {
                return Err(GameError::IllegalMove(format!(
                    "no neutral piece at ({}, {})",
                    from.0, from.1
                )));
            }
            let other = self.other_neutral(from);
            if !in_bounds(to) || to == from || to == other || new_piece.contains(to) || opp.contains(to)
            {
                return Err(GameError::IllegalMove(format!(
                    "neutral piece cannot move to ({}, {})",
                    to.0, to.1
                )));
            }
        }
        Ok(self.apply_unchecked(mv))
    }

    /// Apply a move known to be legal (for instance, one produced by the move
    /// generator) for the player to move.
    pub fn apply_unchecked(&self, mv: &Move) -> Self {
        let player = self.turn;
        let mut pieces = self.pieces;
        pieces[player.index()] = LPiece::from_placement(mv.placement);

        let neutrals = match mv.neutral {
            Some(NeutralRelocation { from, to }) => sort_pair([self.other_neutral(from), to]),
            None => self.neutrals,
        };

        Self {
            pieces,
            neutrals,
            turn: player.opponent(),
        }
    }

    /// The neutral that is not at `cell`.
    #[inline]
    pub(crate) fn other_neutral(&self, cell: Cell) -> Cell {
        if self.neutrals[0] == cell {
            self.neutrals[1]
        } else {
            self.neutrals[0]
        }
    }
}

/// Content of an occupied cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occupant {
    Piece(PlayerId),
    Neutral,
}

#[inline]
fn sort_pair([a, b]: [Cell; 2]) -> [Cell; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

impl fmt::Display for BoardState {
    /// ASCII board with `x` across and `y` down, `(1,1)` at the top left.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 1..=N {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for y in 1..=N {
            write!(f, "{y} ")?;
            for x in 1..=N {
                let ch = match self.occupant((x, y)) {
                    Some(Occupant::Piece(PlayerId::Player1)) => '1',
                    Some(Occupant::Piece(PlayerId::Player2)) => '2',
                    Some(Occupant::Neutral) => 'o',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.turn)
    }
}

//! Computer players.
//!
//! An [`Agent`] picks a move for the player to move in a given state, or
//! returns `None` when that player has no legal move (and so has lost).

use crate::board::BoardState;
use crate::movegen::{Move, Rules, legal_moves};
use crate::search::{SearchConfig, SearchStats, Searcher, minimax};

pub trait Agent {
    /// Short name shown in game output.
    fn name(&self) -> &str;

    /// Choose a move for `state.turn()`.
    fn select_move(&mut self, state: &BoardState) -> Option<Move>;
}

/// Alpha-beta search agent.
pub struct AlphaBetaAgent {
    searcher: Searcher,
}

impl AlphaBetaAgent {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }

    /// Statistics of the most recent search.
    pub fn last_stats(&self) -> SearchStats {
        self.searcher.stats()
    }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn select_move(&mut self, state: &BoardState) -> Option<Move> {
        self.searcher.search(state, state.turn()).best_move
    }
}

/// Unpruned minimax agent. Only practical at depth 1 or 2.
pub struct MinimaxAgent {
    depth: u32,
    rules: Rules,
}

impl MinimaxAgent {
    pub fn new(depth: u32, rules: Rules) -> Self {
        Self { depth, rules }
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_move(&mut self, state: &BoardState) -> Option<Move> {
        minimax(state, state.turn(), self.depth, self.rules).1
    }
}

/// Uniformly random legal moves, reproducible from a seed.
pub struct RandomAgent {
    rng: fastrand::Rng,
    rules: Rules,
}

impl RandomAgent {
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            rules,
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(&mut self, state: &BoardState) -> Option<Move> {
        let moves = legal_moves(state, state.turn(), self.rules);
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::is_legal;

    #[test]
    fn test_random_agent_is_reproducible() {
        let state = BoardState::default();
        let mut a = RandomAgent::new(7, Rules::default());
        let mut b = RandomAgent::new(7, Rules::default());
        for _ in 0..5 {
            let mv = a.select_move(&state);
            assert_eq!(mv, b.select_move(&state));
            assert!(is_legal(&state, state.turn(), &mv.unwrap(), Rules::default()));
        }
    }

    #[test]
    fn test_search_agents_agree() {
        let state = BoardState::default();
        let mut alpha_beta = AlphaBetaAgent::new(SearchConfig::default().with_depth(Some(1)));
        let mut plain = MinimaxAgent::new(1, Rules::default());
        assert_eq!(alpha_beta.select_move(&state), plain.select_move(&state));
        assert!(alpha_beta.last_stats().nodes > 0);
    }
}

//! Minimax search with alpha-beta pruning and a transposition cache.
//!
//! The searcher alternates maximizing nodes (the root player to move) and
//! minimizing nodes (the opponent to move). Leaves are scored with
//! [`evaluate`] from the root player's perspective.
//!
//! Results are cached per search in a table keyed by
//! `(state, remaining depth, maximizing)`. Because pruned nodes only know a
//! bound on their value, each entry records whether its score is exact, a
//! lower bound or an upper bound, and is reused only when that bound settles
//! the node for the current window. Pruning therefore never changes the
//! returned score or the chosen move: ties go to the first move in order, as
//! they do in plain [`minimax`].

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::{BoardState, PlayerId};
use crate::constants::{DEFAULT_DEPTH, MAX_PLIES, SCORE_INF, Score};
use crate::eval::{evaluate, is_center};
use crate::movegen::{Move, Rules, legal_moves};

/// Search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth in plies (`None` = search to the end of the game, cut off at
    /// `max_plies`).
    pub depth: Option<u32>,

    /// Ply cutoff applied to unbounded searches.
    pub max_plies: u32,

    /// Rule set used for move generation and evaluation.
    pub rules: Rules,

    /// Try moves with more central cells first.
    /// Changes which of several equally scored moves is returned.
    pub order_moves: bool,

    /// Node budget. Once spent, remaining nodes below the root are scored
    /// statically.
    pub node_limit: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: Some(DEFAULT_DEPTH),
            max_plies: MAX_PLIES,
            rules: Rules::default(),
            order_moves: false,
            node_limit: None,
        }
    }
}

impl SearchConfig {
    /// Create a new config with a custom depth (`None` for unbounded).
    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with custom rules.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Create a new config with move ordering switched on or off.
    pub fn with_move_ordering(mut self, order_moves: bool) -> Self {
        self.order_moves = order_moves;
        self
    }

    /// Create a new config with a node budget.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Depth searched below the root. The root is always expanded.
    pub fn root_depth(&self) -> u32 {
        self.depth.unwrap_or(self.max_plies).max(1)
    }
}

/// Kind of value stored in a cache entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least the stored score
    Lower,
    /// True value is at most the stored score
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct SearchKey {
    state: BoardState,
    depth: u32,
    maximizing: bool,
}

#[derive(Copy, Clone, Debug)]
struct CacheEntry {
    score: Score,
    best_move: Option<Move>,
    bound: Bound,
}

/// Counters collected during one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited (including leaves and cache hits)
    pub nodes: u64,
    /// Nodes scored by the evaluation function
    pub leaves: u64,
    /// Nodes answered from the cache
    pub cache_hits: u64,
    /// Beta/alpha cutoffs
    pub cutoffs: u64,
    /// Deepest ply visited
    pub max_ply: u32,
}

/// Outcome of a search.
#[derive(Copy, Clone, Debug)]
pub struct SearchResult {
    /// Score of the root from the searching player's perspective
    pub score: Score,
    /// Best move, or `None` if the player has no legal move (a loss)
    pub best_move: Option<Move>,
    pub stats: SearchStats,
}

/// Alpha-beta searcher. Owns its cache; the cache only lives for one search.
pub struct Searcher {
    config: SearchConfig,
    cache: FxHashMap<SearchKey, CacheEntry>,
    stats: SearchStats,
    root_player: PlayerId,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cache: FxHashMap::default(),
            stats: SearchStats::default(),
            root_player: PlayerId::Player1,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search for `player`'s best move in `state`.
    ///
    /// `player` is treated as the player to move, whatever `state.turn()` says.
    pub fn search(&mut self, state: &BoardState, player: PlayerId) -> SearchResult {
        self.cache.clear();
        self.stats = SearchStats::default();
        self.root_player = player;

        let root = state.with_turn(player);
        let depth = self.config.root_depth();
        let (score, best_move) = self.alpha_beta(&root, depth, true, -SCORE_INF, SCORE_INF, 0);

        debug!(
            player = player.number(),
            depth,
            score,
            best_move = %best_move.map(|m| m.to_string()).unwrap_or_else(|| "none".into()),
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            cache_hits = self.stats.cache_hits,
            cutoffs = self.stats.cutoffs,
            cache_size = self.cache.len(),
            "search finished"
        );

        SearchResult {
            score,
            best_move,
            stats: self.stats,
        }
    }

    fn leaf(&mut self, state: &BoardState) -> Score {
        self.stats.leaves += 1;
        evaluate(state, self.root_player, self.config.rules)
    }

    fn alpha_beta(
        &mut self,
        state: &BoardState,
        depth: u32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
        ply: u32,
    ) -> (Score, Option<Move>) {
        self.stats.nodes += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);

        let key = SearchKey {
            state: *state,
            depth,
            maximizing,
        };
        if let Some(entry) = self.cache.get(&key) {
            let settled = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => entry.score >= beta,
                Bound::Upper => entry.score <= alpha,
            };
            if settled {
                self.stats.cache_hits += 1;
                return (entry.score, entry.best_move);
            }
        }

        // The root is expanded whatever the budget
        if ply > 0
            && self
                .config
                .node_limit
                .is_some_and(|limit| self.stats.nodes > limit)
        {
            return (self.leaf(state), None);
        }

        let moves = if depth == 0 {
            Vec::new()
        } else {
            let mut moves = legal_moves(state, state.turn(), self.config.rules);
            if self.config.order_moves {
                order_moves(&mut moves);
            }
            moves
        };
        if moves.is_empty() {
            let score = self.leaf(state);
            self.store(key, score, None, Bound::Exact);
            return (score, None);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move = None;

        for mv in moves {
            let child = state.apply_unchecked(&mv);
            let (score, _) = self.alpha_beta(&child, depth - 1, !maximizing, alpha, beta, ply + 1);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.store(key, best_score, best_move, bound);
        (best_score, best_move)
    }

    fn store(&mut self, key: SearchKey, score: Score, best_move: Option<Move>, bound: Bound) {
        self.cache.insert(
            key,
            CacheEntry {
                score,
                best_move,
                bound,
            },
        );
    }
}

/// Stable sort putting placements with more central cells first.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|m| {
        Reverse(
            m.placement
                .cells()
                .iter()
                .filter(|&&c| is_center(c))
                .count(),
        )
    });
}

/// Best move for `player` at the given depth (`None` = unbounded, cut off at
/// [`MAX_PLIES`]).
///
/// Returns `None` when `player` has no legal move, which means they have lost.
pub fn best_move(state: &BoardState, player: PlayerId, depth: Option<u32>) -> Option<Move> {
    let mut searcher = Searcher::new(SearchConfig::default().with_depth(depth));
    searcher.search(state, player).best_move
}

/// Plain minimax without pruning or caching.
///
/// Exponentially slower than [`Searcher`]; kept as the reference the pruned
/// search must agree with.
pub fn minimax(
    state: &BoardState,
    player: PlayerId,
    depth: u32,
    rules: Rules,
) -> (Score, Option<Move>) {
    fn value(
        state: &BoardState,
        root: PlayerId,
        depth: u32,
        maximizing: bool,
        rules: Rules,
    ) -> (Score, Option<Move>) {
        let moves = if depth == 0 {
            Vec::new()
        } else {
            legal_moves(state, state.turn(), rules)
        };
        if moves.is_empty() {
            return (evaluate(state, root, rules), None);
        }

        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move = None;
        for mv in moves {
            let (score, _) = value(&state.apply_unchecked(&mv), root, depth - 1, !maximizing, rules);
            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = Some(mv);
            }
        }
        (best_score, best_move)
    }

    value(&state.with_turn(player), player, depth.max(1), true, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LOSS_SCORE, WIN_SCORE};
    use crate::geometry::{Orientation, Placement};
    use crate::movegen::is_terminal;

    fn boxed_in() -> BoardState {
        BoardState::from_placements(
            Placement::new((1, 1), Orientation::South),
            [(1, 3), (2, 4)],
            Placement::new((2, 2), Orientation::South),
        )
        .unwrap()
    }

    /// Player 1 to move; exactly one move leaves Player 2 without a reply.
    fn one_winning_move() -> BoardState {
        BoardState::from_placements(
            Placement::new((1, 2), Orientation::North),
            [(2, 1), (4, 3)],
            Placement::new((1, 3), Orientation::South),
        )
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, Some(DEFAULT_DEPTH));
        assert_eq!(config.max_plies, MAX_PLIES);
        assert!(!config.order_moves);
        assert_eq!(config.node_limit, None);
    }

    #[test]
    fn test_root_depth() {
        assert_eq!(SearchConfig::default().with_depth(Some(3)).root_depth(), 3);
        assert_eq!(SearchConfig::default().with_depth(Some(0)).root_depth(), 1);
        assert_eq!(SearchConfig::default().with_depth(None).root_depth(), MAX_PLIES);
    }

    #[test]
    fn test_boxed_in_has_no_move() {
        let state = boxed_in();
        assert_eq!(best_move(&state, PlayerId::Player1, Some(2)), None);

        let mut searcher = Searcher::new(SearchConfig::default());
        let result = searcher.search(&state, PlayerId::Player1);
        assert_eq!(result.score, LOSS_SCORE);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_finds_only_winning_move() {
        let state = one_winning_move();
        let expected = Move::new((3, 2), Orientation::North).with_neutral((2, 1), (3, 4));

        let mut searcher = Searcher::new(SearchConfig::default().with_depth(Some(1)));
        let result = searcher.search(&state, PlayerId::Player1);
        assert_eq!(result.best_move, Some(expected));
        assert_eq!(result.score, WIN_SCORE);

        let next = state.apply(&expected).unwrap();
        assert!(is_terminal(&next, PlayerId::Player2, Rules::default()));
    }

    #[test]
    fn test_matches_minimax() {
        for state in [BoardState::default(), one_winning_move()] {
            for depth in 1..=2 {
                let (score, mv) = minimax(&state, PlayerId::Player1, depth, Rules::default());
                let mut searcher = Searcher::new(SearchConfig::default().with_depth(Some(depth)));
                let result = searcher.search(&state, PlayerId::Player1);
                assert_eq!(result.score, score, "depth {depth}");
                assert_eq!(result.best_move, mv, "depth {depth}");
            }
        }
    }

    #[test]
    fn test_move_ordering_keeps_score() {
        let state = BoardState::default();
        let (score, _) = minimax(&state, PlayerId::Player2, 2, Rules::default());
        let mut searcher = Searcher::new(
            SearchConfig::default()
                .with_depth(Some(2))
                .with_move_ordering(true),
        );
        assert_eq!(searcher.search(&state, PlayerId::Player2).score, score);
    }

    #[test]
    fn test_pruning_happens() {
        let mut searcher = Searcher::new(SearchConfig::default().with_depth(Some(2)));
        searcher.search(&BoardState::default(), PlayerId::Player1);
        let stats = searcher.stats();
        assert!(stats.cutoffs > 0);
        assert!(stats.leaves < 65 * 65);
        assert_eq!(stats.max_ply, 2);
    }

    #[test]
    fn test_search_is_deterministic() {
        let state = BoardState::default();
        let first = best_move(&state, PlayerId::Player1, Some(2));
        assert!(first.is_some());
        for _ in 0..3 {
            assert_eq!(best_move(&state, PlayerId::Player1, Some(2)), first);
        }
    }

    #[test]
    fn test_stats_reset_between_searches() {
        let mut searcher = Searcher::new(SearchConfig::default().with_depth(Some(1)));
        let a = searcher.search(&BoardState::default(), PlayerId::Player1).stats;
        let b = searcher.search(&BoardState::default(), PlayerId::Player1).stats;
        assert_eq!(a, b);
    }

    #[test]
    fn test_node_limit_still_returns_move() {
        let mut searcher = Searcher::new(
            SearchConfig::default()
                .with_depth(None)
                .with_node_limit(1),
        );
        let result = searcher.search(&BoardState::default(), PlayerId::Player1);
        assert!(result.best_move.is_some());
        assert_eq!(result.stats.max_ply, 1);

        // Even an empty budget expands the root
        let mut searcher = Searcher::new(SearchConfig::default().with_node_limit(0));
        let result = searcher.search(&BoardState::default(), PlayerId::Player1);
        assert!(result.best_move.is_some());
        assert_eq!(result.stats.nodes, 1 + 65);
    }

    #[test]
    fn test_order_moves_is_stable() {
        let mut moves = legal_moves(&BoardState::default(), PlayerId::Player1, Rules::default());
        let original = moves.clone();
        order_moves(&mut moves);
        assert_eq!(moves.len(), original.len());
        let centre = |m: &Move| m.placement.cells().iter().filter(|&&c| is_center(c)).count();
        for pair in moves.windows(2) {
            assert!(centre(&pair[0]) >= centre(&pair[1]));
            if centre(&pair[0]) == centre(&pair[1]) {
                let i = original.iter().position(|m| *m == pair[0]).unwrap();
                let j = original.iter().position(|m| *m == pair[1]).unwrap();
                assert!(i < j);
            }
        }
    }
}

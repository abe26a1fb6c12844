//! Depth limited game tree search over heuristic evaluations

use log::{debug, trace};
use thiserror::Error;

use std::time::{Duration, Instant};

use crate::board::{Board, BoardError, Player};
use crate::evaluation::{evaluate_weighted, Utility, Weighting};

/// Plies searched by alpha-beta minimax by default
pub const ALPHA_BETA_DEPTH: usize = 6;
/// Plies searched by expectimax by default
pub const EXPECTIMAX_DEPTH: usize = 5;

// the clock is read on the first node and then once per this many nodes
const DEADLINE_CHECK_INTERVAL: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal moves, the board is full")]
    NoLegalMoves,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Configuration for a [`Searcher`]
///
/// # Example
///
/// ```
/// use connect4_search::{SearchConfig, Weighting};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_alpha_beta_depth(4)
///     .with_weighting(Weighting::Defensive)
///     .with_max_time(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub alpha_beta_depth: usize,
    pub expectimax_depth: usize,
    pub weighting: Weighting,

    /// Nodes past this count are evaluated as if the depth limit was reached
    pub max_nodes: Option<usize>,

    /// Once this much time has passed, remaining nodes are evaluated as if
    /// the depth limit was reached
    pub max_time: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            alpha_beta_depth: ALPHA_BETA_DEPTH,
            expectimax_depth: EXPECTIMAX_DEPTH,
            weighting: Weighting::Balanced,
            max_nodes: None,
            max_time: None,
        }
    }
}

impl SearchConfig {
    pub fn with_alpha_beta_depth(mut self, depth: usize) -> Self {
        self.alpha_beta_depth = depth;
        self
    }

    pub fn with_expectimax_depth(mut self, depth: usize) -> Self {
        self.expectimax_depth = depth;
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }
}

/// Statistics of the most recent search
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: usize,
    pub budget_exhausted: bool,
}

/// Receives diagnostics from a running search
pub trait SearchObserver {
    /// The value of a move considered at the root of the tree
    fn root_move(&mut self, _column: usize, _value: f64) {}

    /// The node or time budget ran out, the rest of the tree is cut off
    fn budget_exhausted(&mut self, _stats: &SearchStats) {}

    /// The column picked by the search
    fn decision(&mut self, _column: usize, _value: f64, _stats: &SearchStats) {}
}

/// Forwards search diagnostics to the `log` facade
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn root_move(&mut self, column: usize, value: f64) {
        trace!("column {} scored {}", column, value);
    }

    fn budget_exhausted(&mut self, stats: &SearchStats) {
        debug!("search budget exhausted after {} nodes", stats.nodes);
    }

    fn decision(&mut self, column: usize, value: f64, stats: &SearchStats) {
        debug!(
            "chose column {} with value {} after {} nodes",
            column, value, stats.nodes
        );
    }
}

/// Discards all diagnostics
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// A depth limited searcher choosing moves for one player
///
/// Every node of the tree owns its own board, produced by [`Board::play`],
/// so sibling branches never see each other's moves.
pub struct Searcher {
    player: Player,
    config: SearchConfig,
    stats: SearchStats,
    deadline: Option<Instant>,
    observer: Box<dyn SearchObserver + Send>,
}

impl Searcher {
    /// Creates a `Searcher` for `player` with the default configuration
    pub fn new(player: Player) -> Self {
        Self::with_config(player, SearchConfig::default())
    }

    pub fn with_config(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            config,
            stats: SearchStats::default(),
            deadline: None,
            observer: Box::new(LogObserver),
        }
    }

    /// Replaces the observer receiving search diagnostics
    pub fn with_observer(mut self, observer: Box<dyn SearchObserver + Send>) -> Self {
        self.observer = observer;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last call to one of the search methods
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    fn begin(&mut self) {
        self.stats = SearchStats::default();
        self.deadline = self.config.max_time.map(|max_time| Instant::now() + max_time);
    }

    fn evaluate(&self, board: &Board) -> Utility {
        evaluate_weighted(board, self.player, self.config.weighting)
    }

    // counts the node and reports whether the budget has run out
    fn out_of_budget(&mut self) -> bool {
        self.stats.nodes += 1;
        if self.stats.budget_exhausted {
            return true;
        }

        let over_nodes = self
            .config
            .max_nodes
            .map_or(false, |max_nodes| self.stats.nodes > max_nodes);
        let over_time = self.stats.nodes % DEADLINE_CHECK_INTERVAL == 1
            && self.deadline.map_or(false, |deadline| Instant::now() >= deadline);

        if over_nodes || over_time {
            self.stats.budget_exhausted = true;
            self.observer.budget_exhausted(&self.stats);
        }
        self.stats.budget_exhausted
    }

    // a decided game, the depth limit or an exhausted budget ends the branch
    fn is_leaf(&mut self, utility: &Utility, depth: usize) -> bool {
        let exhausted = self.out_of_budget();
        utility.is_terminal() || depth == 0 || exhausted
    }

    fn max_value(
        &mut self,
        board: &Board,
        mut alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<f64, SearchError> {
        let utility = self.evaluate(board);
        let moves = board.possible_moves();
        if self.is_leaf(&utility, depth) || moves.is_empty() {
            return Ok(utility.value);
        }

        let mut value = f64::NEG_INFINITY;
        for (row, col) in moves {
            let next = board.play(row, col, self.player)?;
            value = value.max(self.min_value(&next, alpha, beta, depth - 1)?);
            // the opponent already has a better option elsewhere
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn min_value(
        &mut self,
        board: &Board,
        alpha: f64,
        mut beta: f64,
        depth: usize,
    ) -> Result<f64, SearchError> {
        let utility = self.evaluate(board);
        let moves = board.possible_moves();
        if self.is_leaf(&utility, depth) || moves.is_empty() {
            return Ok(utility.value);
        }

        let opponent = self.player.opponent();
        let mut value = f64::INFINITY;
        for (row, col) in moves {
            let next = board.play(row, col, opponent)?;
            value = value.min(self.max_value(&next, alpha, beta, depth - 1)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    fn max_exp_val(&mut self, board: &Board, depth: usize) -> Result<f64, SearchError> {
        let utility = self.evaluate(board);
        let moves = board.possible_moves();
        if self.is_leaf(&utility, depth) || moves.is_empty() {
            return Ok(utility.value);
        }

        let mut value = f64::NEG_INFINITY;
        for (row, col) in moves {
            let next = board.play(row, col, self.player)?;
            value = value.max(self.exp_value(&next, depth - 1)?);
        }
        Ok(value)
    }

    // the opponent picks each legal move with equal probability
    fn exp_value(&mut self, board: &Board, depth: usize) -> Result<f64, SearchError> {
        let utility = self.evaluate(board);
        let moves = board.possible_moves();
        if self.is_leaf(&utility, depth) || moves.is_empty() {
            return Ok(utility.value);
        }

        let opponent = self.player.opponent();
        let num_moves = moves.len();
        let mut total = 0.0;
        for (row, col) in moves {
            let next = board.play(row, col, opponent)?;
            total += self.max_exp_val(&next, depth - 1)?;
        }
        Ok(total / num_moves as f64)
    }

    /// Searches against a perfect opponent with alpha-beta pruning
    ///
    /// Returns the value of the chosen move and its column. Moves must score
    /// strictly above zero, and strictly above every earlier column, to be
    /// chosen; otherwise the leftmost legal column is returned.
    pub fn alpha_beta(&mut self, board: &Board) -> Result<(f64, usize), SearchError> {
        self.begin();

        let moves = board.possible_moves();
        let mut best_move = moves
            .first()
            .map(|&(_, col)| col)
            .ok_or(SearchError::NoLegalMoves)?;
        let mut best_score = 0.0;
        let depth = self.config.alpha_beta_depth.max(1);

        for (row, col) in moves {
            let next = board.play(row, col, self.player)?;
            // moves that can't beat the best score so far may return early
            let score = self.min_value(&next, best_score, f64::INFINITY, depth - 1)?;
            self.observer.root_move(col, score);
            if score > best_score {
                best_score = score;
                best_move = col;
            }
        }

        self.observer.decision(best_move, best_score, &self.stats);
        Ok((best_score, best_move))
    }

    /// Searches against an opponent that moves uniformly at random
    ///
    /// Returns the expected value of the chosen move and its column. Without
    /// a move scoring above zero, the middle column (or the legal column
    /// closest to it) is returned.
    pub fn expectimax(&mut self, board: &Board) -> Result<(f64, usize), SearchError> {
        self.begin();

        let moves = board.possible_moves();
        let mut best_move = nearest_to_middle(board).ok_or(SearchError::NoLegalMoves)?;
        let mut best_score = 0.0;
        let depth = self.config.expectimax_depth.max(1);

        for (row, col) in moves {
            let next = board.play(row, col, self.player)?;
            let score = self.exp_value(&next, depth - 1)?;
            self.observer.root_move(col, score);
            if score > best_score {
                best_score = score;
                best_move = col;
            }
        }

        self.observer.decision(best_move, best_score, &self.stats);
        Ok((best_score, best_move))
    }

    /// The column chosen by [`alpha_beta`](Searcher::alpha_beta)
    pub fn get_alpha_beta_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        self.alpha_beta(board).map(|(_, column)| column)
    }

    /// The column chosen by [`expectimax`](Searcher::expectimax)
    pub fn get_expectimax_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        self.expectimax(board).map(|(_, column)| column)
    }
}

// the playable column closest to the middle, preferring the left on ties
pub(crate) fn nearest_to_middle(board: &Board) -> Option<usize> {
    let middle = board.middle_column() as isize;
    board
        .playable_columns()
        .into_iter()
        .min_by_key(|&col| ((col as isize - middle).abs(), col))
}

/// Chooses a column for `player` with a default alpha-beta search
pub fn choose_move_alpha_beta(board: &Board, player: Player) -> Result<usize, SearchError> {
    Searcher::new(player).get_alpha_beta_move(board)
}

/// Chooses a column for `player` with a default expectimax search
pub fn choose_move_expectimax(board: &Board, player: Player) -> Result<usize, SearchError> {
    Searcher::new(player).get_expectimax_move(board)
}

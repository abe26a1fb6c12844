//! A heuristic game tree search agent for the board game 'Connect 4'
//!
//! Positions are scored by counting connected runs of discs along every row,
//! column and diagonal. The agent searches a fixed number of plies ahead,
//! either against a perfect opponent (alpha-beta minimax) or against an
//! opponent that picks uniformly at random (expectimax).
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{board::{Board, Player}, search::choose_move_alpha_beta};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in a row along the bottom
//! let board = Board::from_moves("152535")?;
//! let column = choose_move_alpha_beta(&board, Player::One)?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod search;

pub mod agent;

pub mod game;

pub mod arena;


pub use board::{Board, BoardError, Cell, Player};
pub use evaluation::{evaluate, Utility, Weighting};
pub use search::{choose_move_alpha_beta, choose_move_expectimax, SearchConfig, SearchError, Searcher};

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of connected discs needed to win
pub const WIN_LENGTH: usize = 4;

// the default board must be able to hold a winning line in every direction
const_assert!(WIN_LENGTH <= WIDTH && WIN_LENGTH <= HEIGHT);

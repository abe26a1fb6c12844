//! Players that pick a column to play: the search agent, a uniformly random
//! opponent and a human reading moves from a text stream

use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use std::io::{BufRead, Write};

use crate::board::{Board, Player};
use crate::search::{SearchConfig, Searcher};

/// Something that chooses a 0-indexed column to play
pub trait Agent {
    fn player(&self) -> Player;

    /// Short description such as `Player 1:ai`
    fn label(&self) -> String;

    fn get_move(&mut self, board: &Board) -> Result<usize>;
}

/// The search algorithm used by an [`AiAgent`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// minimax with alpha-beta pruning, for a perfect opponent
    AlphaBeta,
    /// expectimax, for an opponent that moves at random
    Expectimax,
}

pub struct AiAgent {
    strategy: Strategy,
    searcher: Searcher,
}

impl AiAgent {
    pub fn new(player: Player, strategy: Strategy) -> Self {
        Self::with_config(player, strategy, SearchConfig::default())
    }

    pub fn with_config(player: Player, strategy: Strategy, config: SearchConfig) -> Self {
        Self {
            strategy,
            searcher: Searcher::with_config(player, config),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

impl Agent for AiAgent {
    fn player(&self) -> Player {
        self.searcher.player()
    }

    fn label(&self) -> String {
        format!("Player {}:ai", self.player().id())
    }

    fn get_move(&mut self, board: &Board) -> Result<usize> {
        let column = match self.strategy {
            Strategy::AlphaBeta => self.searcher.get_alpha_beta_move(board)?,
            Strategy::Expectimax => self.searcher.get_expectimax_move(board)?,
        };
        Ok(column)
    }
}

/// Picks any non-full column with equal probability
pub struct RandomAgent<R: Rng> {
    player: Player,
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(player: Player, rng: R) -> Self {
        Self { player, rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn player(&self) -> Player {
        self.player
    }

    fn label(&self) -> String {
        format!("Player {}:random", self.player.id())
    }

    fn get_move(&mut self, board: &Board) -> Result<usize> {
        board
            .playable_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no legal moves, the board is full"))
    }
}

/// Reads 0-indexed columns from `input`, asking again until a legal column
/// is given
pub struct HumanAgent<R: BufRead, W: Write> {
    player: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(player: Player, input: R, output: W) -> Self {
        Self {
            player,
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn player(&self) -> Player {
        self.player
    }

    fn label(&self) -> String {
        format!("Player {}:human", self.player.id())
    }

    fn get_move(&mut self, board: &Board) -> Result<usize> {
        let valid_columns = board.playable_columns();
        if valid_columns.is_empty() {
            return Err(anyhow!("no legal moves, the board is full"));
        }

        loop {
            write!(self.output, "Enter your move: ")?;
            self.output.flush()?;

            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Err(anyhow!("input closed before a move was entered"));
            }

            match buffer.trim().parse::<usize>() {
                Ok(column) if valid_columns.contains(&column) => return Ok(column),
                Ok(_) => writeln!(self.output, "Column full, choose from:{:?}", valid_columns)?,
                Err(_) => writeln!(self.output, "Invalid number: {}", buffer.trim())?,
            }
        }
    }
}

//! Turn order and win/draw detection for a game between two agents

use anyhow::{anyhow, Result};
use log::debug;

use crate::agent::Agent;
use crate::board::{Board, Player};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }

    pub fn is_over(self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    state: GameState,
    // 0-indexed columns played so far
    moves: Vec<usize>,
}

impl Game {
    /// Starts a game on an empty board of the default size, player one to move
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::One)
    }

    /// Continues a game from an existing position
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let state = Self::state_of(&board, to_move.opponent());
        Self {
            board,
            to_move,
            state,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    // `last` moved most recently, so only their win needs checking first
    fn state_of(board: &Board, last: Player) -> GameState {
        for &player in [last, last.opponent()].iter() {
            if board.connected_heuristic(player).1 {
                return match player {
                    Player::One => GameState::PlayerOneWin,
                    Player::Two => GameState::PlayerTwoWin,
                };
            }
        }
        if board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }

    /// Drops a disc for the player to move into the 0-indexed `column`
    pub fn play_column(&mut self, column: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        let (board, row) = self.board.drop_disc(column, self.to_move)?;
        debug!("player {} played ({}, {})", self.to_move.id(), row, column);

        self.state = Self::state_of(&board, self.to_move);
        self.board = board;
        self.moves.push(column);
        self.to_move = self.to_move.opponent();
        Ok(self.state)
    }

    /// Asks the agents for moves in turn until the game ends
    ///
    /// `agents` holds player one's agent first. `on_turn` sees the game
    /// before every move and once more at the end.
    pub fn play_out<F>(
        &mut self,
        agents: &mut [Box<dyn Agent + '_>; 2],
        mut on_turn: F,
    ) -> Result<GameState>
    where
        F: FnMut(&Game),
    {
        while !self.state.is_over() {
            on_turn(self);
            let agent = match self.to_move {
                Player::One => &mut agents[0],
                Player::Two => &mut agents[1],
            };
            let column = agent.get_move(&self.board)?;
            if !self.board.playable(column) {
                return Err(anyhow!(
                    "{} chose column {}, which is not playable",
                    agent.label(),
                    column
                ));
            }
            self.play_column(column)?;
        }
        on_turn(self);
        Ok(self.state)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

//! Heuristic evaluation of a position from one player's point of view

use crate::board::{Board, Player};

/// Magnitude of the utility of a decided position
pub const WIN_UTILITY: f64 = 1_000_000.0;

/// How the opponent's connected score is weighed against the player's own
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Weighting {
    /// own score minus opponent score
    Balanced,
    /// the opponent's score counts half
    Offensive,
    /// the opponent's score counts double
    Defensive,
}

impl Weighting {
    fn combine(self, own: i64, opponent: i64) -> f64 {
        let (own, opponent) = (own as f64, opponent as f64);
        match self {
            Weighting::Balanced => own - opponent,
            Weighting::Offensive => own - opponent / 2.0,
            Weighting::Defensive => own - opponent * 2.0,
        }
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Balanced
    }
}

/// The value of a position, and the winner if the game is already decided
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Utility {
    pub value: f64,
    pub winner: Option<Player>,
}

impl Utility {
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }
}

/// Evaluates `board` for `player` using the balanced weighting
pub fn evaluate(board: &Board, player: Player) -> Utility {
    evaluate_weighted(board, player, Weighting::Balanced)
}

/// Evaluates `board` for `player`
///
/// A four-in-a-row for the opponent is checked first, so a board where both
/// players have connected four scores as a loss.
pub fn evaluate_weighted(board: &Board, player: Player, weighting: Weighting) -> Utility {
    let opponent = player.opponent();
    let (own_score, player_won) = board.connected_heuristic(player);
    let (opponent_score, opponent_won) = board.connected_heuristic(opponent);

    if opponent_won {
        Utility {
            value: -WIN_UTILITY,
            winner: Some(opponent),
        }
    } else if player_won {
        Utility {
            value: WIN_UTILITY,
            winner: Some(player),
        }
    } else {
        Utility {
            value: weighting.combine(own_score, opponent_score),
            winner: None,
        }
    }
}

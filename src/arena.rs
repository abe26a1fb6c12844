//! Batches of games between the search agent and a random opponent, used to
//! measure playing strength

use anyhow::Result;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

use std::time::Instant;

use crate::agent::{Agent, AiAgent, RandomAgent, Strategy};
use crate::board::Player;
use crate::game::{Game, GameState};
use crate::search::SearchConfig;

/// Configuration for [`run_matches`]
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub games: usize,
    pub strategy: Strategy,
    pub search: SearchConfig,
    /// game `i` seeds its random opponent with `seed + i`
    pub seed: u64,
    pub show_progress: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 100,
            strategy: Strategy::Expectimax,
            search: SearchConfig::default(),
            seed: 0,
            show_progress: false,
        }
    }
}

impl ArenaConfig {
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Results of a batch of games, from the search agent's point of view
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub ai_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    pub fn games(&self) -> usize {
        self.ai_wins + self.random_wins + self.draws
    }

    fn merge(self, other: Self) -> Self {
        Self {
            ai_wins: self.ai_wins + other.ai_wins,
            random_wins: self.random_wins + other.random_wins,
            draws: self.draws + other.draws,
        }
    }
}

/// Plays a single game, the search agent moving first on even game indices
fn play_game(config: &ArenaConfig, index: usize) -> Result<MatchSummary> {
    let ai_player = if index % 2 == 0 { Player::One } else { Player::Two };
    let ai: Box<dyn Agent> = Box::new(AiAgent::with_config(
        ai_player,
        config.strategy,
        config.search.clone(),
    ));
    let random: Box<dyn Agent> = Box::new(RandomAgent::new(
        ai_player.opponent(),
        StdRng::seed_from_u64(config.seed.wrapping_add(index as u64)),
    ));
    let mut agents = match ai_player {
        Player::One => [ai, random],
        Player::Two => [random, ai],
    };

    let state = Game::new().play_out(&mut agents, |_| {})?;
    let mut summary = MatchSummary::default();
    match state.winner() {
        Some(winner) if winner == ai_player => summary.ai_wins += 1,
        Some(_) => summary.random_wins += 1,
        None => {
            debug_assert_eq!(state, GameState::Draw);
            summary.draws += 1
        }
    }
    Ok(summary)
}

/// Plays `config.games` independent games in parallel
pub fn run_matches(config: &ArenaConfig) -> Result<MatchSummary> {
    let start = Instant::now();

    let progress = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let summary = (0..config.games)
        .into_par_iter()
        .map(|index| {
            let result = play_game(config, index);
            progress.inc(1);
            result
        })
        .try_reduce(MatchSummary::default, |a, b| Ok(a.merge(b)))?;

    progress.finish();
    info!(
        "{} games in {}: {} won, {} lost, {} drawn",
        summary.games(),
        HumanDuration(start.elapsed()),
        summary.ai_wins,
        summary.random_wins,
        summary.draws
    );
    Ok(summary)
}

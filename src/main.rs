use anyhow::Result;

use std::io::{stdin, stdout, BufReader, Stdin, Write};

use connect4_search::agent::{Agent, AiAgent, HumanAgent, RandomAgent, Strategy};
use connect4_search::arena::{run_matches, ArenaConfig};
use connect4_search::game::{Game, GameState};
use connect4_search::Player;

mod display;

/// Asks a question until the first letter of the answer is one of `options`
fn ask(stdin: &Stdin, question: &str, options: &[char]) -> Result<char> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(letter) if options.contains(&letter) => return Ok(letter),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_strategy(stdin: &Stdin) -> Result<Strategy> {
    let answer = ask(
        stdin,
        "Search with alpha-beta (perfect opponent) or expectimax (random opponent)? a/e: ",
        &['a', 'e'],
    )?;
    Ok(if answer == 'a' {
        Strategy::AlphaBeta
    } else {
        Strategy::Expectimax
    })
}

fn choose_agent(stdin: &Stdin, player: Player) -> Result<Box<dyn Agent>> {
    let question = format!("Is player {} human, AI or random? h/a/r: ", player.id());
    let agent: Box<dyn Agent> = match ask(stdin, &question, &['h', 'a', 'r'])? {
        'h' => Box::new(HumanAgent::new(player, BufReader::new(std::io::stdin()), stdout())),
        'a' => Box::new(AiAgent::new(player, ask_strategy(stdin)?)),
        _ => Box::new(RandomAgent::new(player, rand::thread_rng())),
    };
    Ok(agent)
}

fn play(stdin: &Stdin) -> Result<()> {
    let mut agents = [
        choose_agent(stdin, Player::One)?,
        choose_agent(stdin, Player::Two)?,
    ];
    let labels = [agents[0].label(), agents[1].label()];

    let mut game = Game::new();
    let state = game.play_out(&mut agents, |game| {
        display::draw(game.board()).expect("Failed to draw board!");
        if !game.state().is_over() {
            let label = match game.to_move() {
                Player::One => &labels[0],
                Player::Two => &labels[1],
            };
            println!("{} to move", label);
        }
    })?;

    match state {
        GameState::PlayerOneWin => println!("Player 1 wins!"),
        GameState::PlayerTwoWin => println!("Player 2 wins!"),
        GameState::Draw => println!("Draw!"),
        GameState::Playing => unreachable!("play_out only returns once the game is over"),
    }
    Ok(())
}

fn benchmark(stdin: &Stdin) -> Result<()> {
    let strategy = ask_strategy(stdin)?;

    let games = loop {
        print!("Number of games to play > ");
        stdout().flush().expect("Failed to flush to stdout!");
        let mut input_str = String::new();
        stdin.read_line(&mut input_str)?;

        match input_str.trim().parse::<usize>() {
            Ok(games) if games > 0 => break games,
            _ => println!("Invalid number: {}", input_str.trim()),
        }
    };

    let config = ArenaConfig::default()
        .with_games(games)
        .with_strategy(strategy)
        .with_seed(rand::random())
        .with_progress(true);
    let summary = run_matches(&config)?;

    println!(
        "AI won {}, lost {}, drew {} of {} games",
        summary.ai_wins,
        summary.random_wins,
        summary.draws,
        summary.games()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    match ask(
        &stdin,
        "Play a game, or benchmark the AI against a random player? p/b: ",
        &['p', 'b'],
    )? {
        'p' => play(&stdin),
        _ => benchmark(&stdin),
    }
}

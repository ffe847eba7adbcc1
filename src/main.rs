use anyhow::{anyhow, bail, Context, Result};
use chess_trainer::core::{init_tracing, ClientSettings};
use chess_trainer::game::resources::{GameSession, MoveOutcome, NotationClipboard};
use chess_trainer::networking::{
    ApiOutcome, ConnectionMonitor, FileTokenStore, GamesApi, ResilientClient, TokenStore,
};
use chess_trainer::Catalog;
use clap::Parser;
use shakmaty::{Role, Square};
use std::sync::Arc;
use tracing::{debug, info};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::List => list_catalog(),
        Command::Replay { opening_id, steps } => run_replay(opening_id, steps),
        Command::Puzzle { puzzle_id, moves } => run_puzzle(puzzle_id, &moves),
        Command::Play { moves } => run_play(&moves),
        Command::Health { watch } => run_health(watch).await,
        Command::Save { title, moves } => run_save(title.as_deref(), &moves).await,
        Command::Games => run_games().await,
    }
}

fn list_catalog() -> Result<()> {
    let catalog = Catalog::builtin().context("Failed to load built-in catalog")?;

    println!("Openings:");
    for opening in catalog.openings() {
        println!(
            "  {:>3}  {}  {:<24} {}",
            opening.id,
            opening.eco,
            opening.name,
            opening.moves.join(" ")
        );
    }
    println!("Puzzles:");
    for puzzle in catalog.puzzles() {
        println!("  {:>3}  {:<24} {}", puzzle.id, puzzle.name, puzzle.description);
    }
    Ok(())
}

fn run_replay(opening_id: u32, steps: Option<usize>) -> Result<()> {
    let catalog = Catalog::builtin().context("Failed to load built-in catalog")?;
    let opening = catalog
        .opening(opening_id)
        .ok_or_else(|| anyhow!("No opening with id {opening_id}"))?;

    let mut session: GameSession = GameSession::from_opening(opening);
    println!("{}", session.status_message());

    let steps = steps.unwrap_or(opening.moves.len());
    for _ in 0..steps {
        match session.step_forward()? {
            Some(_) => println!("  {}", session.status_message()),
            None => break,
        }
    }

    print_position(&session);
    Ok(())
}

fn run_puzzle(puzzle_id: u32, moves: &[String]) -> Result<()> {
    let catalog = Catalog::builtin().context("Failed to load built-in catalog")?;
    let puzzle = catalog
        .puzzle(puzzle_id)
        .ok_or_else(|| anyhow!("No puzzle with id {puzzle_id}"))?;

    let mut session: GameSession = GameSession::from_puzzle(puzzle)?;
    println!("{}: {}", puzzle.name, puzzle.description);
    println!("Position: {}", session.position());

    for input in moves {
        let result = submit_move(&mut session, input);
        println!("  {input}: {}", session.status_message());
        if let Ok(MoveOutcome::PuzzleSolved(_)) = result {
            break;
        }
    }

    print_position(&session);
    Ok(())
}

fn run_play(moves: &[String]) -> Result<()> {
    let mut session: GameSession = GameSession::new();

    for input in moves {
        submit_move(&mut session, input)
            .with_context(|| format!("Move {input} was refused"))?;
    }

    let mut clipboard = NotationClipboard::default();
    session.copy_notation(&mut clipboard)?;
    print_position(&session);
    if let Some(pgn) = clipboard.contents() {
        println!("{pgn}");
    }
    Ok(())
}

async fn run_health(watch: bool) -> Result<()> {
    let client = build_client()?;
    if !watch {
        let healthy = client.check_health().await;
        println!(
            "{}: {}",
            client.settings().api_base,
            if healthy { "online" } else { "offline" }
        );
        return Ok(());
    }

    let base = client.settings().api_base.clone();
    let monitor = ConnectionMonitor::spawn_default(Arc::new(client));
    let mut status = monitor.subscribe();
    info!("[CLI] Watching {} (Ctrl-C to stop)", base);

    loop {
        tokio::select! {
            changed = status.changed() => {
                changed.context("Connection monitor stopped")?;
                let current = status.borrow_and_update().clone();
                let checked = current
                    .last_checked
                    .map(|at| at.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                println!(
                    "{checked}  {base}: {}",
                    if current.connected { "online" } else { "offline" }
                );
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

async fn run_save(title: Option<&str>, moves: &[String]) -> Result<()> {
    let mut session: GameSession = GameSession::new();
    for input in moves {
        submit_move(&mut session, input)
            .with_context(|| format!("Move {input} was refused"))?;
    }

    let client = build_client()?;
    let outcome = GamesApi::new(&client)
        .save_game(title, &session.history())
        .await?;
    report(outcome.map_body(|body| body.to_string()))
}

async fn run_games() -> Result<()> {
    let client = build_client()?;
    let outcome = GamesApi::new(&client).list_games().await?;

    match outcome {
        ApiOutcome::Success { body: games, .. } => {
            for game in games {
                let saved = game
                    .saved_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "{:>5}  {:<30} {:>3} moves  {}",
                    game.id.unwrap_or_default(),
                    game.title,
                    game.moves_count,
                    saved
                );
            }
            Ok(())
        }
        other => report(other.map_body(|_| String::new())),
    }
}

fn report(outcome: ApiOutcome<String>) -> Result<()> {
    match outcome {
        ApiOutcome::Success { status, body } => {
            println!("OK ({status}) {body}");
            Ok(())
        }
        ApiOutcome::Rejected { status, body } => bail!("Server rejected the request ({status}): {body}"),
        ApiOutcome::Unreachable(failure) => bail!("{failure}"),
    }
}

fn build_client() -> Result<ResilientClient> {
    let settings = ClientSettings::load_or_default();
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(FileTokenStore::default_path()));
    debug!("[CLI] Using API base {}", settings.api_base);
    Ok(ResilientClient::with_reqwest(settings, tokens)?)
}

/// Coordinates when the input looks like `e2e4`/`e2-e4`/`e7e8q`, SAN otherwise
fn submit_move(
    session: &mut GameSession,
    input: &str,
) -> chess_trainer::game::GameResult<MoveOutcome> {
    match parse_coordinates(input) {
        Some((from, to, promotion)) => session.apply_move(from, to, promotion),
        None => session.apply_notation(input),
    }
}

fn parse_coordinates(input: &str) -> Option<(Square, Square, Option<Role>)> {
    let compact: String = input.chars().filter(|c| *c != '-').collect();
    if !(4..=5).contains(&compact.len()) || !compact.is_ascii() {
        return None;
    }
    let from: Square = compact[0..2].parse().ok()?;
    let to: Square = compact[2..4].parse().ok()?;
    let promotion = match compact[4..].chars().next() {
        Some(c) => Some(Role::from_char(c.to_ascii_lowercase())?),
        None => None,
    };
    Some((from, to, promotion))
}

fn print_position(session: &GameSession) {
    info!("[CLI] {} plies, mode {}", session.history().len(), session.mode().name());
    println!("Position: {}", session.position());
    println!("Moves:    {}", session.history().join(" "));
    let status = session.game_status();
    if status.is_game_over() {
        println!("Result:   {}", status.message());
    }
}

//! Interactive console front end over the `sapper-core` engine.
//!
//! Thin I/O wrapper: reads `o ROW COL` / `m ROW COL` commands, redraws the
//! board after every accepted move, and reports the terminal state. All game
//! rules live in the core crate.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use sapper_core::{Coord, Game, GameState, Level, MoveOp};

mod view;

#[derive(Parser)]
#[command(name = "sapper", about = "Minesweeper for the terminal")]
struct Args {
    /// Difficulty level; prompted interactively when absent
    #[arg(long, value_enum)]
    level: Option<LevelArg>,

    /// Mine placement seed, for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LevelArg {
    Beginner,
    Normal,
    Expert,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Beginner => Level::Beginner,
            LevelArg::Normal => Level::Normal,
            LevelArg::Expert => Level::Expert,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let mut out = io::stdout();

    loop {
        let level = match args.level {
            Some(arg) => arg.into(),
            None => prompt_level(&mut out)?,
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("starting {:?} game with seed {}", level, seed);

        let mut game = Game::create(level, seed)?;
        run_game(&mut game, &mut out)?;
        print_results(&game, &mut out)?;

        writeln!(out, "Press enter to play again, anything else to quit.")?;
        if !read_line()?.trim().is_empty() {
            return Ok(());
        }
    }
}

fn run_game(game: &mut Game, out: &mut impl Write) -> Result<()> {
    let mut keep_playing = true;
    while keep_playing {
        view::clear_screen(out)?;
        writeln!(out, "There is your game board. Marks: {}", game.flags_remaining())?;
        view::draw_board(out, &game.snapshot())?;
        writeln!(
            out,
            "Select an action (o: open, m: mark) and coordinates, e.g. 'o 1 2'\n\
             opens the cell at the second row and third column."
        )?;
        out.flush()?;

        let line = read_line()?;
        let Some((operation, row, col)) = parse_command(&line) else {
            continue;
        };
        // re-prompt on out-of-range input instead of feeding the engine a
        // losing move
        if !game.is_valid_coordinates(row, col) {
            continue;
        }

        keep_playing = game.move_next(operation, row, col);
    }
    Ok(())
}

fn print_results(game: &Game, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Game is over.")?;
    match game.state() {
        GameState::Win => writeln!(out, "Congratulations! You won.")?,
        GameState::Loss => writeln!(out, "You lost! Don't worry.")?,
        GameState::Initial | GameState::Active => return Ok(()),
    }
    view::draw_board(out, &game.revealed_snapshot())?;
    Ok(())
}

fn prompt_level(out: &mut impl Write) -> Result<Level> {
    writeln!(out, "Choose your game level. (1: Beginner, 2: Normal, 3: Expert)")?;
    loop {
        out.flush()?;
        let line = read_line()?;
        match line.trim() {
            "1" => return Ok(Level::Beginner),
            "2" => return Ok(Level::Normal),
            "3" => return Ok(Level::Expert),
            other => writeln!(out, "'{}' is wrong input, try again", other)?,
        }
    }
}

/// Parses a move command of the form `"o 1 2"` / `"M 0 0"`.
fn parse_command(line: &str) -> Option<(MoveOp, Coord, Coord)> {
    let mut parts = line.split_whitespace();
    let operation = match parts.next()? {
        "o" | "O" => MoveOp::Open,
        "m" | "M" => MoveOp::Mark,
        _ => return None,
    };
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((operation, row, col))
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_open_and_mark_commands() {
        assert_eq!(parse_command("o 1 2"), Some((MoveOp::Open, 1, 2)));
        assert_eq!(parse_command("M 0 0"), Some((MoveOp::Mark, 0, 0)));
        assert_eq!(parse_command("  m  13 7 "), Some((MoveOp::Mark, 13, 7)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("x 1 2"), None);
        assert_eq!(parse_command("o one 2"), None);
        assert_eq!(parse_command("o 1"), None);
        assert_eq!(parse_command("o 1 2 3"), None);
        assert_eq!(parse_command("o -1 2"), None);
        assert_eq!(parse_command("o 300 2"), None);
    }
}

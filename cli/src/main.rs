use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sapper_core::{Board, CellView, Coord2, FlagOutcome, GameConfig, RevealOutcome};

use crate::command::Action;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Console minesweeper", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    width: u8,

    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    height: u8,

    /// Number of mines; prompted for when omitted
    #[arg(short, long)]
    mines: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .init();

    let mines = match args.mines {
        Some(mines) => mines,
        None => prompt_mine_count()?,
    };

    let config = GameConfig::new((args.width, args.height), mines)
        .context("unplayable board configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut board = Board::new(config, seed);
    play(&mut board)
}

fn prompt_mine_count() -> anyhow::Result<u16> {
    print!("How many mines do you want on the field?");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    input.trim().parse().context("mine count must be a number")
}

fn play(board: &mut Board) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", render::render(board));
        print!("Set/unset mines marks or claim a cell as free:");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            // Input closed; nothing more to play.
            return Ok(());
        };
        let command = match command::parse(&line?) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        // Both command kinds bounce off an opened numbered cell before they
        // reach the board.
        if numbered_cell(board, command.coords) {
            println!("There is a number here!");
            continue;
        }

        match command.action {
            Action::ToggleMark => match board.toggle_flag(command.coords) {
                Ok(FlagOutcome::Toggled { .. }) => {}
                Ok(FlagOutcome::RejectedNumberedCell) => println!("There is a number here!"),
                Err(err) => println!("{err}"),
            },
            Action::Reveal => match board.reveal(command.coords) {
                Ok(RevealOutcome::HitMine) => {
                    print!("{}", render::render(board));
                    println!("You stepped on a mine and failed!");
                    return Ok(());
                }
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
        }

        if board.is_won() {
            print!("{}", render::render(board));
            println!("Congratulations! You found all the mines!");
            return Ok(());
        }
    }
}

fn numbered_cell(board: &Board, coords: Coord2) -> bool {
    let (width, height) = board.size();
    if coords.0 >= width || coords.1 >= height {
        // Out of bounds goes to the board so the proper error surfaces.
        return false;
    }
    matches!(board.cell_view(coords), CellView::Revealed(count) if count > 0)
}

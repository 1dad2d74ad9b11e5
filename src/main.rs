use std::io::{self, Read};
use std::process;

use clap::{Parser, Subcommand};
use minesweeper_ai::config::defaults;
use minesweeper_ai::{Config, Configuration, Game, Inference, Status};

/// Minesweeper with a player that reasons about the clues
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the player play games on random boards
    Play {
        #[arg(long, default_value_t = defaults::HEIGHT)]
        height: usize,
        #[arg(long, default_value_t = defaults::WIDTH)]
        width: usize,
        #[arg(long, default_value_t = defaults::MINES)]
        mines: usize,
        /// Seed for the first game, later games use the following seeds
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Deduce once per revealed cell instead of until nothing new is learned
        #[arg(long)]
        single_pass: bool,
        /// Print every finished position
        #[arg(long)]
        show: bool,
    },
    /// Check whether the probe of a configuration read from stdin is safe
    Probe,
}

fn main() {
    env_logger::init();

    let result = match Args::parse().command {
        Command::Play {
            height,
            width,
            mines,
            seed,
            games,
            single_pass,
            show,
        } => {
            let mut config = Config {
                height,
                width,
                mines,
                seed,
                ..Config::default()
            };
            if single_pass {
                config.inference = Inference::SinglePass;
            }
            play(config, games, show)
        }
        Command::Probe => probe(),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn play(config: Config, games: usize, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (mut won, mut lost, mut stalled) = (0, 0, 0);
    for n in 0..games {
        let mut game = Game::new(&config.nth_game(n))?;
        let status = game.run();
        match status {
            Status::Won => won += 1,
            Status::Lost(_) => lost += 1,
            _ => stalled += 1,
        }
        if show {
            println!("Game {}: {:?}", n + 1, status);
            println!("{}", game.configuration());
            println!();
        }
    }
    println!(
        "{} games with {} inference: {} won, {} lost, {} stalled",
        games, config.inference, won, lost, stalled
    );
    Ok(())
}

fn probe() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "A Minesweeper board configuration consists of `_` (unknown), `*` (mine), `s` (safe), \
         `?` (probe), number (number of mines around)."
    );
    println!(
        "Enter a Minesweeper board configuration with one probe (ending with EOF), \
         or an empty string to see example:"
    );
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let mut raw_conf = buffer.trim().to_string();
    if raw_conf.is_empty() {
        raw_conf = "
_ _ 2 _ 3 _
2 _ _ * * 3
1 1 2 4 _ 3
1 ? 3 4 _ 2
2 * * * _ 3
_ 3 3 3 * *"
            .trim()
            .to_string();
        println!("Example board:");
        println!("{}", raw_conf);
    }
    let conf: Configuration = raw_conf.parse()?;
    let probe = conf.probe().ok_or("configuration has no probe")?;

    println!();
    println!("Single clue deduction: {:?}", conf.local_verdict(probe));
    println!("All clues together: {:?}", conf.exact_verdict(probe)?);
    Ok(())
}

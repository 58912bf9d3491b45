use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::WriteLogger;

use app::App;
use config::Config;
use error::Result;

mod app;
mod config;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod motion;
mod snake;
mod speed;
mod term;

fn main() -> ExitCode {
    let config = Config::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("cursnake: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    // logs go to a file, the terminal belongs to the game
    WriteLogger::init(
        config.log_level,
        simplelog::Config::default(),
        File::create(&config.log_file)?,
    )?;
    info!("starting on a {}x{} grid", config.rows, config.cols);

    let speed = config.speed_controller()?;
    // seeded once for the whole process, every game draws from the same stream
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let rng = StdRng::seed_from_u64(seed);

    let keys = term::spawn_stdin_channel();
    let raw_mode = term::RawMode::enable()?;
    let mut app = App::new(config, speed, rng, keys, Box::new(io::stdout()));
    let result = app.run();
    drop(raw_mode);

    info!("leaving with best score {}", app.best_score());
    println!("Best score: {}", app.best_score());
    result
}

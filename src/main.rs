use std::error::Error;
use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use tile_snake::config::{FRAMES_PER_SECOND, GRID, WINDOW_SCALE, WINDOW_TITLE};
use tile_snake::error::AppError;
use tile_snake::game::GameState;
use tile_snake::random::clock_seed;
use tile_snake::terminal_runtime::{self, RunOptions};

#[derive(Debug, Parser)]
#[command(version, about = "Classic Snake on a 64x48 grid, drawn in the terminal")]
struct Cli {
    /// Seed for food placement. Defaults to one taken from the clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Largest display scale to use; smaller terminals get a smaller scale.
    #[arg(
        long,
        default_value_t = WINDOW_SCALE,
        value_parser = clap::value_parser!(u16).range(1..=4)
    )]
    scale: u16,

    /// Host frames per second. The snake moves once every few frames.
    #[arg(
        long,
        default_value_t = FRAMES_PER_SECOND,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    fps: u32,

    /// Write a debug log to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_file.as_deref()) {
        eprintln!("{}", describe(&error));
        return ExitCode::FAILURE;
    }

    install_panic_hook();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", describe(&error));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(
        "starting with seed {seed}, max scale {}, {} fps",
        cli.scale, cli.fps
    );

    let mut state = GameState::new_with_seed(GRID, seed);
    let options = RunOptions {
        title: WINDOW_TITLE.to_owned(),
        max_scale: cli.scale,
        frames_per_second: cli.fps,
    };

    terminal_runtime::run_game(&mut state, &options)?;
    info!("closed with score {}", state.score);
    Ok(())
}

/// Errors go to stderr once the terminal is restored; `--log-file` adds a
/// full debug log.
fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Error,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}

fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        terminal_runtime::restore_terminal_best_effort();
        default_hook(panic_info);
    }));
}

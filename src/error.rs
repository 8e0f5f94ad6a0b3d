use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Fatal host failures. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialise the terminal")]
    TerminalInit(#[source] io::Error),

    #[error("failed to read terminal input")]
    Input(#[source] io::Error),

    #[error("failed to draw a frame")]
    Draw(#[source] io::Error),

    #[error("failed to open log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install the logger")]
    Logger(#[from] SetLoggerError),
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Trip data for {city:?} is unavailable at {path:?}: {source}")]
    DataUnavailable {
        city: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed trip data on line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("No data for this selection")]
    NoData,

    #[error("Input closed before a {prompt} was given")]
    InputClosed { prompt: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

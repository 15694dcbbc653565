//! Crate-wide error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while generating, writing or reading a series.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot write \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in \"{}\": {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no such calendar month: year {year}, month {month}")]
    Calendar { year: i32, month: u32 },

    #[error("invalid series at row {row}: {message}")]
    Series { row: usize, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

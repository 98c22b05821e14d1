use std::path::PathBuf;

mod samples;
mod summary;
mod config;
pub mod plot;

#[derive(Debug)]
pub enum Error {
    NotFound(PathBuf),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotFound(path) =>
                write!(f, "sample log {} not found", path.display()),
            Self::Io(io_error) =>
                write!(f, "I/O error: {}", io_error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            &Self::Io(ref io_error) => Some(io_error),
            _ => None
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use samples::{
    ByteOrder,
    Samples,
    decode,
    load,
};

pub use summary::{
    PREFIX_LEN,
    Summary,
    Statistics,
    summarize,
    report,
};

pub use config::{
    DEFAULT_PATH,
    DEFAULT_SAMPLE_RATE,
    Configuration,
};

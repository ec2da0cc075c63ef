//! Errors of the configuration layer. The engine itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown input method: {0}")]
    UnknownInputMethod(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

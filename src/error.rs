// SPDX-License-Identifier: MPL-2.0
use crate::domain::playback::{InvalidRangeError, TimeCodeError};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Loop Range Error: {0}")]
    Range(#[from] InvalidRangeError),

    #[error("Time Code Error: {0}")]
    TimeCode(#[from] TimeCodeError),
}

impl Error {
    /// Returns the i18n message key for errors shown in the loop panel.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Range(err) => err.i18n_key(),
            Error::TimeCode(err) => err.i18n_key(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

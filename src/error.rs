use crate::length::Length;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BondError {
    #[error("Invalid dimension '{input}': {reason}")]
    InvalidDimension { input: String, reason: &'static str },

    #[error("Invalid block set: {0}")]
    InvalidBlockSet(String),

    #[error("{0}")]
    RangeRejected(String),

    #[error("Width {width} has more than {limit} possible rows")]
    TooManyRows { width: Length, limit: usize },

    #[error("Panel count overflowed at height {height}")]
    NumericOverflow { height: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for BondError {
    fn from(err: toml::de::Error) -> Self {
        BondError::Config(format!("TOML parse error: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, BondError>;

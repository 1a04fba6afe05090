use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// configuring `chlog` or resolving contributor identities.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file: {0}")]
    ConfigParse(PathBuf),

    #[error("incorrect format for config: {0}")]
    ConfigFormat(String),

    #[error("unrecognized link-style field: {0}")]
    LinkStyle(String),

    #[error("unrecognized grouping field: {0}")]
    Grouping(String),

    #[error("fatal I/O error")]
    Io(#[from] std::io::Error),

    #[error("no version set to release")]
    MissingVersion,

    #[error("identity lookup failed: {0}")]
    Lookup(String),
}

// Error types
// Only table construction and query parsing fail; lookups return None and filters an empty Vec

use crate::storage::{Region, Subregion};
use std::io;
use thiserror::Error;

/// The error type for countrydb operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading a dataset file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Dataset JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record's subregion is not registered under its region.
    #[error("Country '{country}' has subregion '{subregion}' which is not part of region '{region}'")]
    InvalidSubregion {
        country: String,
        region: Region,
        subregion: Subregion,
    },

    /// A field name that no country record carries.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A string that does not name a member of a closed enumeration.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// SQL text the parser could not read.
    #[error("SQL parsing error: {0}")]
    Sql(#[from] sqlparser::parser::ParserError),

    /// A shell command given the wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// A well-formed query that the engine does not support.
    #[error("Unsupported query: {0}")]
    Unsupported(String),
}

/// A specialized Result type for countrydb operations.
pub type Result<T> = std::result::Result<T, Error>;

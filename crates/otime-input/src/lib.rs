//! Input normalization for the results engine.
//!
//! Readers that turn punch-record sources and course definitions into the
//! core's in-memory representation:
//! - `jsonl`: JSON Lines punch records, one runner per line
//! - `punchcard`: the semicolon/dash-delimited inline punch string
//! - `courses`: comma- or semicolon-separated control lists and course files
//! - `clock`: clock strings and RFC 3339 timestamps to seconds-of-day
//! - `name`: display-name normalization, kept out of the core contract
//!
//! Every reader delivers punch times in one consistent integer-second time
//! base per runner, as the engine requires.

use thiserror::Error;

pub mod clock;
pub mod courses;
pub mod jsonl;
pub mod name;
pub mod punchcard;

/// Errors from reading punch records or course definitions.
#[derive(Debug, Error)]
pub enum InputError {
    /// The source could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON Lines record failed to parse.
    #[error("line {line}: invalid punch record: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line violated the expected format.
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    /// A clock value was not a recognized time form.
    #[error("invalid clock value: {value:?}")]
    Clock { value: String },

    /// A value failed core-type validation.
    #[error(transparent)]
    Validation(#[from] otime_core::ValidationError),
}

impl InputError {
    /// Attaches a 1-based line number, turning the error into a line error.
    fn at_line(self, line: usize) -> Self {
        match self {
            Self::Record { .. } | Self::Line { .. } | Self::Io(_) => self,
            other => Self::Line {
                line,
                message: other.to_string(),
            },
        }
    }
}

//! Configuration errors.
//!
//! Raised by the loaders before a run starts, or by the scheduler when it
//! is handed records that no loader would have produced. A run that gets
//! past configuration never fails. `line` fields are 1-based and are `None`
//! when the input had no line structure (TOML rows, records built in code).

use std::fmt;
use std::io;

#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// Reading the input failed.
    Io(io::Error),
    /// The TOML document did not parse or did not match the schema.
    Toml(toml::de::Error),
    /// A required key never appeared.
    MissingKey { key: &'static str },
    /// A `key = value` line did not split into exactly a known key and a value.
    MalformedKeyValue { line: usize, text: String },
    /// A line matched no key and is not inside the process table.
    UnrecognizedLine { line: usize, text: String },
    /// A value that should be an integer is not one.
    InvalidNumber { line: Option<usize>, value: String },
    /// A time or count is below zero.
    NegativeValue {
        key: String,
        value: i64,
        line: Option<usize>,
    },
    /// A quantum of zero would never make progress.
    ZeroQuantum { key: &'static str },
    /// A process asks for no CPU time.
    ZeroBurst { process: String, line: Option<usize> },
    /// Two processes share a name.
    DuplicateName { process: String, line: Option<usize> },
    /// A process has an empty name.
    EmptyName { line: Option<usize> },
    /// `process_table` appeared before `process_table_size`.
    TableBeforeSize { line: usize },
    /// Input ended before all declared table rows were read.
    TruncatedTable { expected: usize, found: usize },
    /// A table row is not `name arrival burst`.
    MalformedRow { line: usize, text: String },
    /// `admission` names an unknown policy.
    UnknownAdmission { line: usize, value: String },
    /// The last arrival plus every burst does not fit in the simulation clock.
    TimeOverflow { process: String, line: Option<usize> },
}

struct At(Option<usize>);

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, " (line {line})"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Toml(err) => write!(f, "invalid TOML configuration: {err}"),
            Self::MissingKey { key } => write!(f, "missing required key `{key}`"),
            Self::MalformedKeyValue { line, text } => {
                write!(f, "line {line}: expected `key = value`, got `{text}`")
            }
            Self::UnrecognizedLine { line, text } => {
                write!(f, "line {line}: unrecognized line `{text}`")
            }
            Self::InvalidNumber { line, value } => {
                write!(f, "`{value}` is not an integer{}", At(*line))
            }
            Self::NegativeValue { key, value, line } => {
                write!(f, "{key} must not be negative, got {value}{}", At(*line))
            }
            Self::ZeroQuantum { key } => write!(f, "{key} must be at least 1"),
            Self::ZeroBurst { process, line } => {
                write!(f, "process {process} has a burst time of 0{}", At(*line))
            }
            Self::DuplicateName { process, line } => {
                write!(f, "process name {process} is used twice{}", At(*line))
            }
            Self::EmptyName { line } => write!(f, "process name is empty{}", At(*line)),
            Self::TableBeforeSize { line } => write!(
                f,
                "line {line}: process_table appears before process_table_size"
            ),
            Self::TruncatedTable { expected, found } => write!(
                f,
                "process table declares {expected} rows but input ends after {found}"
            ),
            Self::MalformedRow { line, text } => {
                write!(f, "line {line}: expected `name arrival burst`, got `{text}`")
            }
            Self::UnknownAdmission { line, value } => write!(
                f,
                "line {line}: unknown admission policy `{value}` (expected cycle-boundary or every-slice)"
            ),
            Self::TimeOverflow { process, line } => write!(
                f,
                "process {process} pushes the simulated clock past {}{}",
                u64::MAX,
                At(*line)
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

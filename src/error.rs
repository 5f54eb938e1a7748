//! Crate-level error types.

use std::fmt;

/// Errors produced by the metavis crate.
///
/// The kinematics core never fails; these cover the fallible edges (files,
/// scenario text, options, and the path-planner boundary).
#[derive(Debug)]
pub enum MetavisError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Malformed scenario text.
    ScenarioParse {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
    /// A shape name that is not one of the known module shapes.
    UnknownShape(String),
    /// Lattice configuration JSON failure.
    ConfigJson(String),
    /// The external path planner reported a failure.
    Planner(String),
}

impl fmt::Display for MetavisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
            Self::ScenarioParse { line, message } => {
                write!(f, "scenario parse error on line {line}: {message}")
            }
            Self::UnknownShape(name) => write!(f, "unknown module shape '{name}'"),
            Self::ConfigJson(msg) => write!(f, "lattice configuration error: {msg}"),
            Self::Planner(msg) => write!(f, "path planner error: {msg}"),
        }
    }
}

impl std::error::Error for MetavisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MetavisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MetavisError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigJson(e.to_string())
    }
}
